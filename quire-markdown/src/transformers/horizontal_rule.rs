//! Horizontal rule: `---`, `***` or `___` alone on a line.

use crate::transformer::{ElementTransformer, ExportContext, ImportContext};
use crate::tree::{Document, NodeId, NodeKind, NodeType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(---|\*\*\*|___)\s?$").unwrap());

#[derive(Debug, Default)]
pub struct HorizontalRuleTransformer;

impl HorizontalRuleTransformer {
    pub fn new() -> Self {
        HorizontalRuleTransformer
    }
}

impl ElementTransformer for HorizontalRuleTransformer {
    fn name(&self) -> &str {
        "horizontal_rule"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::HorizontalRule]
    }

    fn reg_exp(&self) -> &Regex {
        &HR_RE
    }

    fn export(&self, doc: &Document, node: NodeId, _ctx: &ExportContext) -> Option<String> {
        doc.is(node, NodeType::HorizontalRule)
            .then(|| "***".to_string())
    }

    fn replace(
        &self,
        doc: &mut Document,
        parent: NodeId,
        _children: &[NodeId],
        _captures: &Captures,
        ctx: &ImportContext,
    ) -> bool {
        let line = doc.create(NodeKind::HorizontalRule);
        // Typed in front of existing blocks: keep the paragraph for what follows.
        if ctx.is_import || doc.next_sibling(parent).is_none() {
            doc.replace(parent, line);
        } else {
            doc.insert_before(parent, line);
        }
        doc.select_next(line);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_all_three_markers() {
        let rule = HorizontalRuleTransformer::new();
        for line in ["---", "***", "___", "--- "] {
            assert!(rule.reg_exp().is_match(line), "{line}");
        }
        for line in ["----", "-- -", "text ---", "---  "] {
            assert!(!rule.reg_exp().is_match(line), "{line}");
        }
    }
}
