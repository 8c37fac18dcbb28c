//! Opaque third-party embeds addressed by id, e.g. `<tweet id="123" />`.
//!
//! One rule per tag. The editor registers `tweet`; any other provider that
//! only needs an identifier can be added with [`EmbedTransformer::new`].

use crate::transformer::{ElementTransformer, ExportContext, ImportContext};
use crate::tree::{Document, NodeId, NodeKind, NodeType};
use regex::{Captures, Regex};
use tracing::debug;

#[derive(Debug)]
pub struct EmbedTransformer {
    tag: String,
    re: Regex,
}

impl EmbedTransformer {
    pub fn new(tag: &str) -> Self {
        let pattern = format!(r#"<{}\s+id="([^"]+?)"\s?/>\s?$"#, regex::escape(tag));
        EmbedTransformer {
            tag: tag.to_string(),
            // Escaped tag inside a fixed pattern always compiles.
            re: Regex::new(&pattern).unwrap(),
        }
    }

    pub fn tweet() -> Self {
        Self::new("tweet")
    }
}

impl ElementTransformer for EmbedTransformer {
    fn name(&self) -> &str {
        &self.tag
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::Embed]
    }

    fn reg_exp(&self) -> &Regex {
        &self.re
    }

    fn export(&self, doc: &Document, node: NodeId, _ctx: &ExportContext) -> Option<String> {
        match doc.kind(node) {
            NodeKind::Embed { tag, id } if *tag == self.tag => {
                Some(format!(r#"<{tag} id="{id}" />"#))
            }
            _ => None,
        }
    }

    fn replace(
        &self,
        doc: &mut Document,
        parent: NodeId,
        _children: &[NodeId],
        captures: &Captures,
        _ctx: &ImportContext,
    ) -> bool {
        let Some(id) = captures.get(1) else {
            return false;
        };
        let embed = doc.create(NodeKind::Embed {
            tag: self.tag.clone(),
            id: id.as_str().to_string(),
        });
        debug!(tag = %self.tag, id = id.as_str(), "embed placeholder");
        if doc.text_content(parent).trim().is_empty() {
            doc.replace(parent, embed);
        } else {
            doc.insert_after(parent, embed);
        }
        doc.select_next(embed);
        true
    }
}
