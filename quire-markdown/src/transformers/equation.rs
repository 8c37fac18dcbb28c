//! Inline math: `$E = mc^2$`.

use crate::transformer::{ExportContext, TextMatchTransformer};
use crate::tree::{Document, NodeId, NodeKind, NodeType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static EQUATION_IMPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([^$]+?)\$").unwrap());
static EQUATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([^$]+?)\$$").unwrap());

#[derive(Debug, Default)]
pub struct EquationTransformer;

impl EquationTransformer {
    pub fn new() -> Self {
        EquationTransformer
    }
}

impl TextMatchTransformer for EquationTransformer {
    fn name(&self) -> &str {
        "equation"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::Equation]
    }

    fn import_reg_exp(&self) -> &Regex {
        &EQUATION_IMPORT_RE
    }

    fn reg_exp(&self) -> &Regex {
        &EQUATION_RE
    }

    fn trigger(&self) -> Option<char> {
        Some('$')
    }

    fn export(&self, doc: &Document, node: NodeId, _ctx: &ExportContext) -> Option<String> {
        match doc.kind(node) {
            NodeKind::Equation { equation, .. } => Some(format!("${equation}$")),
            _ => None,
        }
    }

    fn replace(&self, doc: &mut Document, node: NodeId, captures: &Captures) -> Option<NodeId> {
        let equation = doc.create(NodeKind::Equation {
            equation: captures.get(1)?.as_str().to_string(),
            inline: true,
        });
        doc.replace(node, equation);
        Some(equation)
    }
}
