//! Inspection output for document trees and registries
//!
//! Treeviz is a visual representation of the document tree, one line per node:
//!
//! ```text
//! ⧉ Document (2 blocks)
//! ├─ § h1 Title
//! │ └─ ◦ Title
//! └─ ▦ 2 rows × 2 columns
//!   ├─ ▤ 2 cells
//!   ...
//! ```
//!
//! Each line is `<prefix><connector> <icon> <label>`, labels truncated to 30
//! characters. JSON output is the serde rendering of the node snapshots.
//!
//! Icons
//!     Blocks:
//!         Root: ⧉
//!         Paragraph: ¶
//!         Heading: §
//!         Quote: "
//!         List: ☰
//!         ListItem: •
//!         Code: 𝒱
//!     Tables:
//!         Table: ▦
//!         TableRow: ▤
//!         TableCell: ▢
//!     Inlines:
//!         Text: ◦
//!         LineBreak: ↵
//!         Link: ⊕
//!     Decorators:
//!         HorizontalRule: ⎯
//!         Image: ▣
//!         Equation: √
//!         Embed: ⧈

use crate::error::TransformError;
use crate::registry::TransformerRegistry;
use crate::tree::{Document, ListType, NodeId, NodeKind, NodeType};
use serde::Serialize;
use std::str::FromStr;

const LABEL_WIDTH: usize = 30;

/// Unicode icon for a node type.
pub fn get_icon(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Root => "⧉",
        NodeType::Paragraph => "¶",
        NodeType::Heading => "§",
        NodeType::Quote => "\"",
        NodeType::List => "☰",
        NodeType::ListItem => "•",
        NodeType::Code => "𝒱",
        NodeType::Text => "◦",
        NodeType::LineBreak => "↵",
        NodeType::Link => "⊕",
        NodeType::HorizontalRule => "⎯",
        NodeType::Image => "▣",
        NodeType::Equation => "√",
        NodeType::Embed => "⧈",
        NodeType::Table => "▦",
        NodeType::TableRow => "▤",
        NodeType::TableCell => "▢",
    }
}

fn truncate(text: &str) -> String {
    let single_line = text.replace('\n', "↵");
    if single_line.chars().count() <= LABEL_WIDTH {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(LABEL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// One-line description of a node.
pub fn display_label(doc: &Document, node: NodeId) -> String {
    let content = || truncate(&doc.text_content(node));
    match doc.kind(node) {
        NodeKind::Root => format!("Document ({})", plural(doc.children(node).len(), "block")),
        NodeKind::Paragraph | NodeKind::Quote => {
            let text = content();
            if text.is_empty() {
                "(empty)".to_string()
            } else {
                text
            }
        }
        NodeKind::Heading { level } => format!("h{level} {}", content()),
        NodeKind::List { list_type } => {
            let flavour = match list_type {
                ListType::Bullet => "bullet".to_string(),
                ListType::Number { start } => format!("numbered from {start}"),
                ListType::Check => "check".to_string(),
            };
            format!("{} ({flavour})", plural(doc.children(node).len(), "item"))
        }
        NodeKind::ListItem { checked } => {
            let inline: String = doc
                .children(node)
                .iter()
                .filter(|child| !doc.is(**child, NodeType::List))
                .map(|child| doc.text_content(*child))
                .collect();
            match checked {
                Some(true) => format!("[x] {}", truncate(&inline)),
                Some(false) => format!("[ ] {}", truncate(&inline)),
                None => truncate(&inline),
            }
        }
        NodeKind::Code { language } => {
            let lines = doc.text_content(node).lines().count();
            format!(
                "{} ({})",
                language.as_deref().unwrap_or("plain"),
                plural(lines, "line")
            )
        }
        NodeKind::Text { text, format } => {
            let names = format.names();
            if names.is_empty() {
                truncate(text)
            } else {
                format!("{} [{}]", truncate(text), names.join(", "))
            }
        }
        NodeKind::LineBreak => "line break".to_string(),
        NodeKind::Link { url } => format!("{} → {}", content(), truncate(url)),
        NodeKind::HorizontalRule => "horizontal rule".to_string(),
        NodeKind::Image { alt, src, .. } => format!("{} → {}", truncate(alt), truncate(src)),
        NodeKind::Equation { equation, inline } => {
            let mode = if *inline { "inline" } else { "block" };
            format!("{} ({mode})", truncate(equation))
        }
        NodeKind::Embed { tag, id } => format!("{tag} {id}"),
        NodeKind::Table => {
            let columns = doc
                .first_child(node)
                .map_or(0, |row| doc.children(row).len());
            format!(
                "{} × {}",
                plural(doc.children(node).len(), "row"),
                plural(columns, "column")
            )
        }
        NodeKind::TableRow => plural(doc.children(node).len(), "cell"),
        NodeKind::TableCell { header } => {
            let text = content();
            if header.is_row() {
                format!("{text} (header)")
            } else {
                text
            }
        }
    }
}

fn format_node(
    doc: &Document,
    node: NodeId,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(doc.node_type(node));

    let mut output = format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon,
        display_label(doc, node)
    );
    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    output.push_str(&format_children(doc, node, &child_prefix));
    output
}

fn format_children(doc: &Document, node: NodeId, prefix: &str) -> String {
    let children = doc.children(node);
    let mut output = String::new();
    for (index, child) in children.iter().enumerate() {
        output.push_str(&format_node(doc, *child, prefix, index, children.len()));
    }
    output
}

/// Treeviz dump of the subtree rooted at `node`.
pub fn to_treeviz_str(doc: &Document, node: NodeId) -> String {
    let header = format!(
        "{} {}\n",
        get_icon(doc.node_type(node)),
        display_label(doc, node)
    );
    header + &format_children(doc, node, "")
}

/// Pretty JSON of the blocks below `node`.
pub fn to_json(doc: &Document, node: NodeId) -> Result<String, TransformError> {
    Ok(serde_json::to_string_pretty(&doc.snapshot_children(node))?)
}

/// Output formats for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectFormat {
    #[default]
    Treeviz,
    Json,
}

impl InspectFormat {
    pub fn name(self) -> &'static str {
        match self {
            InspectFormat::Treeviz => "treeviz",
            InspectFormat::Json => "json",
        }
    }
}

impl FromStr for InspectFormat {
    type Err = TransformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "treeviz" | "tree" => Ok(InspectFormat::Treeviz),
            "json" => Ok(InspectFormat::Json),
            other => Err(TransformError::NotSupported(format!(
                "Unknown inspection format '{other}'"
            ))),
        }
    }
}

/// Render the whole document in the requested format.
pub fn render(doc: &Document, format: InspectFormat) -> Result<String, TransformError> {
    match format {
        InspectFormat::Treeviz => Ok(to_treeviz_str(doc, doc.root())),
        InspectFormat::Json => to_json(doc, doc.root()),
    }
}

/// Registry entry as shown by rule listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSummary {
    pub position: usize,
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<char>,
    pub dependencies: Vec<&'static str>,
    pub pattern: String,
}

pub fn rule_summaries(registry: &TransformerRegistry) -> Vec<RuleSummary> {
    registry
        .iter()
        .enumerate()
        .map(|(position, rule)| RuleSummary {
            position,
            name: rule.name().to_string(),
            kind: rule.kind(),
            trigger: rule.trigger(),
            dependencies: rule.dependencies().iter().map(|t| t.name()).collect(),
            pattern: rule.pattern(),
        })
        .collect()
}

/// Aligned, human-readable rule table in precedence order.
pub fn rules_to_text(registry: &TransformerRegistry) -> String {
    let summaries = rule_summaries(registry);
    let name_width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut output = String::new();
    for summary in &summaries {
        let trigger = summary
            .trigger
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        output.push_str(&format!(
            "{:>2}. {:<name_width$}  {:<11}  {}  {}\n",
            summary.position + 1,
            summary.name,
            summary.kind,
            trigger,
            summary.dependencies.join(", "),
        ));
    }
    output
}

pub fn rules_to_json(registry: &TransformerRegistry) -> Result<String, TransformError> {
    Ok(serde_json::to_string_pretty(&rule_summaries(registry))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeSnapshot;

    #[test]
    fn test_unknown_format() {
        let err = "yaml".parse::<InspectFormat>().unwrap_err();
        assert!(matches!(err, TransformError::NotSupported(_)));
        assert_eq!("JSON".parse::<InspectFormat>(), Ok(InspectFormat::Json));
    }

    #[test]
    fn test_labels_are_truncated() {
        let long = "x".repeat(40);
        let doc = Document::from_blocks(&[NodeSnapshot::paragraph(long)]);
        let paragraph = doc.first_child(doc.root()).unwrap();
        let label = display_label(&doc, paragraph);
        assert_eq!(label.chars().count(), LABEL_WIDTH);
        assert!(label.ends_with('…'));
    }

    #[test]
    fn test_rule_summaries_follow_registry_order() {
        let registry = TransformerRegistry::playground();
        let summaries = rule_summaries(&registry);
        assert_eq!(summaries[0].name, "table");
        assert_eq!(summaries[0].kind, "element");
        assert_eq!(summaries[2].trigger, Some(')'));
        assert_eq!(summaries.len(), registry.len());
    }

    #[test]
    fn test_json_uses_type_tags() {
        let doc = Document::from_blocks(&[NodeSnapshot::leaf(NodeKind::HorizontalRule)]);
        let json: serde_json::Value = serde_json::from_str(&to_json(&doc, doc.root()).unwrap()).unwrap();
        assert_eq!(json[0]["node"]["type"], "horizontal_rule");
    }
}
