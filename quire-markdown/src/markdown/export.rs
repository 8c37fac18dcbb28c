//! Document tree → Markdown text.

use super::is_empty_paragraph;
use crate::registry::TransformerRegistry;
use crate::transformer::ExportContext;
use crate::tree::{Document, NodeId, NodeKind, NodeType, TextFormat};

/// Serialize the children of `target` (the root when `None`).
///
/// Consecutive non-empty blocks are separated by a blank line, unless
/// `preserve_new_lines` is set, in which case blocks are separated by a single
/// newline and empty paragraphs stand for the blank lines.
pub fn convert_to_markdown_string(
    registry: &TransformerRegistry,
    doc: &Document,
    target: Option<NodeId>,
    preserve_new_lines: bool,
) -> String {
    let target = target.unwrap_or_else(|| doc.root());
    let ctx = ExportContext {
        registry,
        preserve_new_lines,
    };

    let children = doc.children(target);
    let mut output = Vec::with_capacity(children.len());
    for (index, child) in children.iter().enumerate() {
        let Some(result) = export_top_level(doc, *child, &ctx) else {
            continue;
        };
        let separated = !preserve_new_lines
            && index > 0
            && !is_empty_paragraph(doc, *child)
            && !is_empty_paragraph(doc, children[index - 1]);
        if separated {
            output.push(format!("\n{result}"));
        } else {
            output.push(result);
        }
    }
    output.join("\n")
}

fn export_top_level(doc: &Document, node: NodeId, ctx: &ExportContext) -> Option<String> {
    for rule in ctx.registry.elements() {
        if let Some(result) = rule.export(doc, node, ctx) {
            return Some(result);
        }
    }
    let node_type = doc.node_type(node);
    if node_type.is_element() {
        return Some(export_children(doc, node, ctx));
    }
    if node_type.is_decorator() {
        return Some(export_text_match(doc, node, ctx).unwrap_or_else(|| doc.text_content(node)));
    }
    None
}

fn export_text_match(doc: &Document, node: NodeId, ctx: &ExportContext) -> Option<String> {
    ctx.registry
        .text_matches()
        .find_map(|rule| rule.export(doc, node, ctx))
}

pub fn export_children(doc: &Document, node: NodeId, ctx: &ExportContext) -> String {
    export_nodes(doc, doc.children(node), ctx)
}

/// Serialize a run of inline nodes.
pub fn export_nodes(doc: &Document, nodes: &[NodeId], ctx: &ExportContext) -> String {
    let mut output = String::new();
    for node in nodes {
        if let Some(result) = export_text_match(doc, *node, ctx) {
            output.push_str(&result);
            continue;
        }
        match doc.kind(*node) {
            NodeKind::LineBreak => output.push('\n'),
            NodeKind::Text { text, .. } => output.push_str(&export_text_format(doc, *node, text, ctx)),
            kind if kind.node_type().is_element() => {
                output.push_str(&export_children(doc, *node, ctx))
            }
            _ => output.push_str(&doc.text_content(*node)),
        }
    }
    output
}

/// Nearest text node on one side, looking through inline links.
fn text_sibling(doc: &Document, node: NodeId, backward: bool) -> Option<NodeId> {
    let step = |id: NodeId| {
        if backward {
            doc.previous_sibling(id)
        } else {
            doc.next_sibling(id)
        }
    };
    let mut sibling = step(node);
    if sibling.is_none() {
        sibling = doc
            .parent(node)
            .filter(|parent| doc.is(*parent, NodeType::Link))
            .and_then(step);
    }
    let sibling = sibling?;
    match doc.node_type(sibling) {
        NodeType::Text => Some(sibling),
        NodeType::Link => {
            let edge = if backward {
                doc.last_child(sibling)
            } else {
                doc.first_child(sibling)
            };
            edge.filter(|child| doc.is(*child, NodeType::Text))
        }
        _ => None,
    }
}

/// Wrap `content` in the tags for the formats of `node`.
///
/// Only single-format tags are used, one per format. A tag is not reopened
/// when the previous text sibling already carries the format, nor closed when
/// the next one does, so `**a*b***` style runs come out as one bold span.
/// Surrounding whitespace stays outside the tags.
pub fn export_text_format(
    doc: &Document,
    node: NodeId,
    content: &str,
    ctx: &ExportContext,
) -> String {
    let format = doc.text_format(node).unwrap_or_default();
    let frozen = content.trim();
    if format.is_empty() || frozen.is_empty() {
        return content.to_string();
    }

    let previous = text_sibling(doc, node, true).and_then(|id| doc.text_format(id));
    let next = text_sibling(doc, node, false).and_then(|id| doc.text_format(id));
    let has = |side: Option<TextFormat>, flag: TextFormat| side.is_some_and(|f| f.contains(flag));

    let mut output = frozen.to_string();
    let mut applied = TextFormat::empty();
    for rule in ctx.registry.text_formats().filter(|t| t.is_single_format()) {
        if !format.contains(rule.format) || applied.contains(rule.format) {
            continue;
        }
        applied.insert(rule.format);
        if !has(previous, rule.format) {
            output.insert_str(0, rule.tag);
        }
        if !has(next, rule.format) {
            output.push_str(rule.tag);
        }
    }

    let leading = &content[..content.len() - content.trim_start().len()];
    let trailing = &content[content.trim_end().len()..];
    format!("{leading}{output}{trailing}")
}
