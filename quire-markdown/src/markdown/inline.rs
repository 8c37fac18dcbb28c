//! Inline import: format tags and text-match rules.
//!
//! A format run only claims text ahead of a text-match construct when it wraps
//! the whole construct, so `$a*b*c$` stays an equation while `**$x$**` is a
//! bold equation.

use crate::registry::TransformerRegistry;
use crate::transformer::{TextFormatTransformer, TextMatchTransformer};
use crate::tree::{Document, NodeId, TextFormat};
use regex::Captures;
use tracing::debug;

/// Span of one tagged run, `start..end` including both tags.
#[derive(Debug, Clone, Copy)]
struct FormatMatch {
    start: usize,
    end: usize,
    tag_len: usize,
    format: TextFormat,
}

fn char_before(text: &str, index: usize) -> Option<char> {
    text[..index].chars().next_back()
}

fn char_at(text: &str, index: usize) -> Option<char> {
    text[index..].chars().next()
}

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(char::is_alphanumeric)
}

fn opens_at(text: &str, index: usize, rule: &TextFormatTransformer) -> bool {
    if !text[index..].starts_with(rule.tag) || char_before(text, index) == Some('\\') {
        return false;
    }
    if !rule.intraword && is_word_char(char_before(text, index)) {
        return false;
    }
    match char_at(text, index + rule.tag.len()) {
        Some(next) => !next.is_whitespace() && next != rule.tag_char(),
        None => false,
    }
}

fn closes_at(text: &str, index: usize, rule: &TextFormatTransformer) -> bool {
    if !text[index..].starts_with(rule.tag) {
        return false;
    }
    match char_before(text, index) {
        Some(previous) if previous.is_whitespace() || previous == rule.tag_char() => return false,
        Some('\\') | None => return false,
        Some(_) => {}
    }
    rule.intraword || !is_word_char(char_at(text, index + rule.tag.len()))
}

/// The leftmost tagged run; at one position tags are tried in registry order.
fn find_outermost_match(text: &str, registry: &TransformerRegistry) -> Option<FormatMatch> {
    for (index, _) in text.char_indices() {
        for rule in registry.text_formats() {
            if !opens_at(text, index, rule) {
                continue;
            }
            let content_start = index + rule.tag.len();
            let closing = text[content_start..]
                .char_indices()
                .map(|(offset, _)| content_start + offset)
                .find(|candidate| closes_at(text, *candidate, rule));
            if let Some(close) = closing {
                return Some(FormatMatch {
                    start: index,
                    end: close + rule.tag.len(),
                    tag_len: rule.tag.len(),
                    format: rule.format,
                });
            }
        }
    }
    None
}

impl FormatMatch {
    /// Whether this run is applied before a text-match construct at
    /// `start..end`. Runs that enclose the construct go first, and so do code
    /// spans opening at or before it. Otherwise the construct keeps its text.
    fn claims(&self, start: usize, end: usize) -> bool {
        let encloses = self.start <= start && end <= self.end;
        encloses || (self.format.contains(TextFormat::CODE) && self.start <= start)
    }
}

/// Earliest text-match construct in `text`; on a tie the rule registered
/// first wins.
fn find_text_match<'r, 't>(
    text: &'t str,
    registry: &'r TransformerRegistry,
) -> Option<(&'r dyn TextMatchTransformer, Captures<'t>)> {
    let mut best: Option<(&dyn TextMatchTransformer, Captures)> = None;
    for rule in registry.text_matches() {
        let Some(captures) = rule.import_reg_exp().captures(text) else {
            continue;
        };
        let Some(whole) = captures.get(0).filter(|m| !m.as_str().is_empty()) else {
            continue;
        };
        let earlier = match &best {
            Some((_, current)) => whole.start() < current.get(0).map_or(usize::MAX, |m| m.start()),
            None => true,
        };
        if earlier {
            best = Some((rule, captures));
        }
    }
    best
}

/// Run the inline pass over one text node. The node may be split, re-formatted
/// or replaced; siblings created along the way are processed too.
pub(crate) fn import_text(doc: &mut Document, node: NodeId, registry: &TransformerRegistry) {
    let Some(text) = doc.text(node).map(str::to_string) else {
        return;
    };
    let format = doc.text_format(node).unwrap_or_default();
    // Code spans are literal.
    if format.contains(TextFormat::CODE) {
        return;
    }

    let tagged = find_outermost_match(&text, registry);
    match (tagged, find_text_match(&text, registry)) {
        (None, None) => {}
        (Some(found), None) => apply_format(doc, node, &text, format, found, registry),
        (None, Some((rule, captures))) => apply_text_match(doc, node, rule, &captures, registry),
        (Some(found), Some((rule, captures))) => {
            let (start, end) = captures.get(0).map_or((0, 0), |m| (m.start(), m.end()));
            if found.claims(start, end) {
                apply_format(doc, node, &text, format, found, registry);
            } else {
                apply_text_match(doc, node, rule, &captures, registry);
            }
        }
    }
}

fn apply_format(
    doc: &mut Document,
    node: NodeId,
    text: &str,
    format: TextFormat,
    found: FormatMatch,
    registry: &TransformerRegistry,
) {
    let pieces = doc.split_text(node, &[found.start, found.end]);
    let mut pieces = pieces.into_iter();
    let before = (found.start > 0).then(|| pieces.next()).flatten();
    let Some(matched) = pieces.next() else {
        return;
    };
    let after = pieces.next();

    let inner = &text[found.start + found.tag_len..found.end - found.tag_len];
    doc.set_text(matched, inner);
    doc.set_text_format(matched, format.union(found.format));

    for piece in [Some(matched), before, after].into_iter().flatten() {
        import_text(doc, piece, registry);
    }
}

/// Hand the matched span to `rule`, then process the text on either side.
/// A declined match stays as literal text.
fn apply_text_match(
    doc: &mut Document,
    node: NodeId,
    rule: &dyn TextMatchTransformer,
    captures: &Captures,
    registry: &TransformerRegistry,
) {
    let Some(whole) = captures.get(0) else {
        return;
    };
    let pieces = doc.split_text(node, &[whole.start(), whole.end()]);
    let mut pieces = pieces.into_iter();
    let before = (whole.start() > 0).then(|| pieces.next()).flatten();
    let Some(matched) = pieces.next() else {
        return;
    };
    let after = pieces.next();

    match rule.replace(doc, matched, captures) {
        Some(_) => debug!(rule = rule.name(), "inline rule matched"),
        None => debug!(rule = rule.name(), "inline rule declined"),
    }
    for piece in [before, after].into_iter().flatten() {
        import_text(doc, piece, registry);
    }
}
