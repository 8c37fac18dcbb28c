//! Markdown shortcuts applied while typing.
//!
//! After each inserted character the caret-anchored patterns are re-run
//! against the text node holding the caret:
//!
//! - element rules, when a space completes a block marker at the start of a
//!   paragraph (`# `, `- `, `---`, a table row);
//! - text-match rules, when the typed character is a rule's trigger;
//! - text-format rules, when the typed character closes a tag.

use crate::registry::TransformerRegistry;
use crate::transformer::ImportContext;
use crate::tree::{Document, NodeId, NodeType, Selection};
use tracing::debug;

/// Insert `ch` at byte `offset` of a text node, move the caret after it and
/// run the shortcuts. Returns whether a rule fired.
pub fn type_char(
    doc: &mut Document,
    registry: &TransformerRegistry,
    node: NodeId,
    offset: usize,
    ch: char,
) -> bool {
    let mut buffer = [0u8; 4];
    doc.insert_text(node, offset, ch.encode_utf8(&mut buffer));
    let caret = offset + ch.len_utf8();
    doc.set_selection(Some(Selection::Caret { node, offset: caret }));
    handle_text_input(doc, registry, node, caret)
}

/// Run the shortcuts for a caret at byte `caret` in text node `node`, right
/// after a character was inserted.
pub fn handle_text_input(
    doc: &mut Document,
    registry: &TransformerRegistry,
    node: NodeId,
    caret: usize,
) -> bool {
    let Some(text) = doc.text(node).map(str::to_string) else {
        return false;
    };
    if caret == 0 || caret > text.len() || !text.is_char_boundary(caret) {
        return false;
    }

    run_element_transformers(doc, registry, node, &text, caret)
        || run_text_match_transformers(doc, registry, node, &text, caret)
        || run_text_format_transformers(doc, registry, node, &text, caret)
}

fn run_element_transformers(
    doc: &mut Document,
    registry: &TransformerRegistry,
    node: NodeId,
    text: &str,
    caret: usize,
) -> bool {
    let Some(parent) = doc.parent(node) else {
        return false;
    };
    if !doc.is(parent, NodeType::Paragraph) || doc.first_child(parent) != Some(node) {
        return false;
    }
    // Block markers are only completed by a space.
    if !text[..caret].ends_with(' ') {
        return false;
    }

    let ctx = ImportContext {
        registry,
        is_import: false,
    };
    for rule in registry.elements() {
        let Some(captures) = rule.reg_exp().captures(text) else {
            continue;
        };
        let Some(matched) = captures.get(0) else {
            continue;
        };
        let expected_end = if matched.as_str().ends_with(' ') {
            caret
        } else {
            caret - 1
        };
        if matched.start() != 0 || matched.end() != expected_end {
            continue;
        }

        let next_siblings = doc.next_siblings(node);
        let pieces = doc.split_text(node, &[caret]);
        let remainder = pieces.get(1).copied();
        doc.remove(node);

        let mut siblings: Vec<NodeId> = remainder.into_iter().collect();
        siblings.extend(next_siblings);
        if rule.replace(doc, parent, &siblings, &captures, &ctx) {
            debug!(rule = rule.name(), "block shortcut");
            return true;
        }

        // Declined: put the untouched text back.
        doc.set_text(node, text);
        if let Some(remainder) = remainder {
            doc.remove(remainder);
        }
        match doc.first_child(parent) {
            Some(first) => doc.insert_before(first, node),
            None => doc.append(parent, node),
        }
    }
    false
}

fn run_text_match_transformers(
    doc: &mut Document,
    registry: &TransformerRegistry,
    node: NodeId,
    text: &str,
    caret: usize,
) -> bool {
    let typed = text[..caret].chars().next_back();
    let head = &text[..caret];

    for rule in registry.text_matches() {
        if rule.trigger().is_none() || rule.trigger() != typed {
            continue;
        }
        let Some(captures) = rule.reg_exp().captures(head) else {
            continue;
        };
        let Some(matched) = captures.get(0) else {
            continue;
        };

        let pieces = doc.split_text(node, &[matched.start(), matched.end()]);
        let target = if matched.start() == 0 {
            pieces[0]
        } else {
            pieces[1]
        };
        match rule.replace(doc, target, &captures) {
            Some(replacement) => {
                debug!(rule = rule.name(), "inline shortcut");
                doc.select_next(replacement);
                return true;
            }
            None => {
                if let Some(parent) = doc.parent(node) {
                    doc.normalize_text(parent);
                }
            }
        }
    }
    false
}

fn run_text_format_transformers(
    doc: &mut Document,
    registry: &TransformerRegistry,
    node: NodeId,
    text: &str,
    caret: usize,
) -> bool {
    let head = &text[..caret];
    let format = doc.text_format(node).unwrap_or_default();

    for rule in registry.text_formats() {
        let tag = rule.tag;
        if !head.ends_with(tag) || head.len() == tag.len() {
            continue;
        }
        let close = caret - tag.len();
        // Space before the closing tag cancels the format.
        if head[..close].ends_with(char::is_whitespace) {
            continue;
        }
        if !rule.intraword
            && text[caret..]
                .chars()
                .next()
                .is_some_and(char::is_alphanumeric)
        {
            continue;
        }

        let Some(open) = head[..close]
            .rmatch_indices(tag)
            .map(|(index, _)| index)
            .find(|index| {
                head[index + tag.len()..]
                    .chars()
                    .next()
                    .is_some_and(|next| !next.is_whitespace() && next != rule.tag_char())
            })
        else {
            continue;
        };
        if open + tag.len() == close {
            continue;
        }
        let before_open = head[..open].chars().next_back();
        if before_open == Some(rule.tag_char()) {
            continue;
        }
        if !rule.intraword && before_open.is_some_and(char::is_alphanumeric) {
            continue;
        }

        let inner = &head[open + tag.len()..close];
        let rebuilt = format!("{}{}{}", &head[..open], inner, &text[caret..]);
        doc.set_text(node, rebuilt);
        let pieces = doc.split_text(node, &[open, open + inner.len()]);
        let target = if open == 0 { pieces[0] } else { pieces[1] };
        doc.set_text_format(target, format.union(rule.format));
        doc.set_selection(Some(Selection::Caret {
            node: target,
            offset: inner.len(),
        }));
        debug!(rule = rule.name, "format shortcut");
        return true;
    }
    false
}
