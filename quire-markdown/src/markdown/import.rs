//! Markdown text → document tree.

use super::inline::import_text;
use super::is_empty_paragraph;
use crate::registry::TransformerRegistry;
use crate::transformer::ImportContext;
use crate::transformers::builtin::CodeTransformer;
use crate::tree::{Document, NodeId, NodeKind};
use tracing::{debug, trace};

/// Replace the children of `target` (the root when `None`) with the blocks
/// parsed from `markdown`.
///
/// `registry` order decides which rule claims a line. Blank lines separate
/// blocks and are dropped unless `preserve_new_lines` is set, in which case
/// each becomes an empty paragraph.
pub fn convert_from_markdown_string(
    markdown: &str,
    registry: &TransformerRegistry,
    doc: &mut Document,
    target: Option<NodeId>,
    preserve_new_lines: bool,
) {
    let target = target.unwrap_or_else(|| doc.root());
    for child in doc.children(target).to_vec() {
        doc.remove(child);
    }

    let ctx = ImportContext {
        registry,
        is_import: true,
    };
    let lines: Vec<&str> = markdown
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut index = 0;
    while index < lines.len() {
        if let Some(end) = import_code_block(doc, target, &lines, index) {
            index = end + 1;
            continue;
        }
        import_line(doc, target, lines[index], &ctx);
        index += 1;
    }

    if !preserve_new_lines {
        for child in doc.children(target).to_vec() {
            if is_empty_paragraph(doc, child) && doc.children(target).len() > 1 {
                doc.remove(child);
            }
        }
    }

    if doc.selection().is_some() {
        doc.select_start(target);
    }
}

/// Collect a fenced block opening at `start`. Returns the index of the closing
/// fence, or `None` when `start` is not an opening fence or the fence is never
/// closed.
fn import_code_block(
    doc: &mut Document,
    target: NodeId,
    lines: &[&str],
    start: usize,
) -> Option<usize> {
    let fence = CodeTransformer::fence_reg_exp();
    let opening = fence.captures(lines[start])?;
    let end = (start + 1..lines.len()).find(|index| fence.is_match(lines[*index]))?;

    let language = opening.get(1).map(|m| m.as_str().to_string());
    let code = doc.create(NodeKind::Code { language });
    let content = lines[start + 1..end].join("\n");
    if !content.is_empty() {
        let text = doc.create_text(content);
        doc.append(code, text);
    }
    doc.append(target, code);
    trace!(lines = end - start - 1, "code block");
    Some(end)
}

fn is_within(doc: &Document, node: NodeId, ancestor: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = doc.parent(id);
    }
    false
}

fn import_line(doc: &mut Document, target: NodeId, line: &str, ctx: &ImportContext) {
    let paragraph = doc.create_paragraph(line);
    doc.append(target, paragraph);
    let Some(text) = doc.first_child(paragraph) else {
        return;
    };

    for rule in ctx.registry.elements() {
        let Some(captures) = rule.reg_exp().captures(line) else {
            continue;
        };
        let Some(matched) = captures.get(0) else {
            continue;
        };
        let remaining = format!("{}{}", &line[..matched.start()], &line[matched.end()..]);
        doc.set_text(text, remaining);
        if rule.replace(doc, paragraph, &[text], &captures, ctx) {
            debug!(rule = rule.name(), "block rule matched");
            break;
        }
        doc.set_text(text, line);
    }

    if !is_within(doc, text, target) {
        return;
    }
    let container = doc.parent(text);
    if doc.text(text).is_some_and(|value| !value.is_empty()) {
        import_text(doc, text, ctx.registry);
    }
    if let Some(container) = container {
        doc.normalize_text(container);
    }
}
