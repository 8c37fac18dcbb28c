//! Inline links: `[text](url)`.

use crate::transformer::{ExportContext, TextMatchTransformer};
use crate::tree::{Document, NodeId, NodeKind, NodeType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static LINK_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\[([^\[]+)\])(?:\(([^(]+)\))").unwrap());
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\[([^\[]+)\])(?:\(([^(]+)\))$").unwrap());

#[derive(Debug, Default)]
pub struct LinkTransformer;

impl LinkTransformer {
    pub fn new() -> Self {
        LinkTransformer
    }
}

impl TextMatchTransformer for LinkTransformer {
    fn name(&self) -> &str {
        "link"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::Link]
    }

    fn import_reg_exp(&self) -> &Regex {
        &LINK_IMPORT_RE
    }

    fn reg_exp(&self) -> &Regex {
        &LINK_RE
    }

    fn trigger(&self) -> Option<char> {
        Some(')')
    }

    fn export(&self, doc: &Document, node: NodeId, ctx: &ExportContext) -> Option<String> {
        let NodeKind::Link { url } = doc.kind(node) else {
            return None;
        };
        let content = format!("[{}]({url})", doc.text_content(node));
        match doc.children(node) {
            [only] if doc.is(*only, NodeType::Text) => Some(ctx.export_format(doc, *only, &content)),
            _ => Some(content),
        }
    }

    fn replace(&self, doc: &mut Document, node: NodeId, captures: &Captures) -> Option<NodeId> {
        let text = captures.get(1)?.as_str();
        let url = captures.get(2)?.as_str();
        let format = doc.text_format(node).unwrap_or_default();

        let link = doc.create(NodeKind::Link {
            url: url.to_string(),
        });
        let label = doc.create(NodeKind::formatted_text(text, format));
        doc.append(link, label);
        doc.replace(node, link);
        Some(link)
    }
}
