//! Inline image: `![alt](src)`.

use crate::transformer::{ExportContext, TextMatchTransformer};
use crate::tree::{Document, NodeId, NodeKind, NodeType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Width, in layout units, given to images created from Markdown.
pub const DEFAULT_IMAGE_MAX_WIDTH: u32 = 800;

static IMAGE_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!(?:\[([^\[]*)\])(?:\(([^(]+)\))").unwrap());
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!(?:\[([^\[]*)\])(?:\(([^(]+)\))$").unwrap());

#[derive(Debug)]
pub struct ImageTransformer {
    max_width: u32,
}

impl Default for ImageTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageTransformer {
    pub fn new() -> Self {
        ImageTransformer {
            max_width: DEFAULT_IMAGE_MAX_WIDTH,
        }
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }
}

impl TextMatchTransformer for ImageTransformer {
    fn name(&self) -> &str {
        "image"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::Image]
    }

    fn import_reg_exp(&self) -> &Regex {
        &IMAGE_IMPORT_RE
    }

    fn reg_exp(&self) -> &Regex {
        &IMAGE_RE
    }

    fn trigger(&self) -> Option<char> {
        Some(')')
    }

    fn export(&self, doc: &Document, node: NodeId, _ctx: &ExportContext) -> Option<String> {
        match doc.kind(node) {
            NodeKind::Image { alt, src, .. } => Some(format!("![{alt}]({src})")),
            _ => None,
        }
    }

    fn replace(&self, doc: &mut Document, node: NodeId, captures: &Captures) -> Option<NodeId> {
        let alt = captures.get(1).map_or("", |m| m.as_str());
        let src = captures.get(2).map_or("", |m| m.as_str());
        let image = doc.create(NodeKind::Image {
            alt: alt.to_string(),
            src: src.to_string(),
            max_width: self.max_width,
        });
        doc.replace(node, image);
        Some(image)
    }
}
