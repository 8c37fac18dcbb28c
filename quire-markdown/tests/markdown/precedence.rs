//! Registry order decides which rule claims a line.

use crate::common::{blocks, find_first, import, round_trip};
use once_cell::sync::Lazy;
use quire_markdown::transformers::TableTransformer;
use quire_markdown::tree::{Document, ListType, NodeId, NodeKind, NodeType, TextFormat};
use quire_markdown::{
    convert_from_markdown_string, ElementTransformer, ExportContext, ImportContext,
    TransformerRegistry, PLAYGROUND_TRANSFORMERS,
};
use regex::{Captures, Regex};

static LOOSE_CHECK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\s|x)?\]").unwrap());

/// A generic checklist rule that accepts a box anywhere in the line.
struct LooseCheckList;

impl ElementTransformer for LooseCheckList {
    fn name(&self) -> &str {
        "loose_check_list"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::List, NodeType::ListItem]
    }

    fn reg_exp(&self) -> &Regex {
        &LOOSE_CHECK_RE
    }

    fn export(&self, _doc: &Document, _node: NodeId, _ctx: &ExportContext) -> Option<String> {
        None
    }

    fn replace(
        &self,
        doc: &mut Document,
        parent: NodeId,
        children: &[NodeId],
        _captures: &Captures,
        _ctx: &ImportContext,
    ) -> bool {
        let list = doc.create(NodeKind::List {
            list_type: ListType::Check,
        });
        let item = doc.create(NodeKind::ListItem {
            checked: Some(false),
        });
        doc.append(list, item);
        doc.append_all(item, children);
        doc.replace(parent, list);
        true
    }
}

fn first_block_type(registry: &TransformerRegistry, line: &str) -> NodeType {
    let mut doc = Document::new();
    convert_from_markdown_string(line, registry, &mut doc, None, false);
    doc.node_type(blocks(&doc)[0])
}

#[test]
fn test_table_is_ahead_of_generic_rules() {
    let position = |name: &str| PLAYGROUND_TRANSFORMERS.position(name).unwrap();
    assert_eq!(position("table"), 0);
    assert!(position("table") < position("check_list"));
    assert!(position("table") < position("unordered_list"));
    assert!(position("horizontal_rule") < position("unordered_list"));
    assert!(position("image") < position("link"));
}

#[test]
fn test_table_row_with_checkbox_stays_a_table() {
    let line = "| [ ] | buy milk |";

    let mut registry = TransformerRegistry::new();
    registry.register_element(TableTransformer::new());
    registry.register_element(LooseCheckList);
    assert_eq!(first_block_type(&registry, line), NodeType::Table);

    // Same rules, opposite order: the generic rule shadows the table.
    let mut reversed = TransformerRegistry::new();
    reversed.register_element(LooseCheckList);
    reversed.register_element(TableTransformer::new());
    assert_eq!(first_block_type(&reversed, line), NodeType::List);
}

#[test]
fn test_horizontal_rule_beats_bullet_list() {
    let doc = import("***");
    assert_eq!(doc.node_type(blocks(&doc)[0]), NodeType::HorizontalRule);

    let doc = import("* item");
    assert_eq!(doc.node_type(blocks(&doc)[0]), NodeType::List);
}

#[test]
fn test_image_beats_link() {
    let doc = import("![alt](a.png)");
    let paragraph = blocks(&doc)[0];
    let kinds: Vec<NodeType> = doc
        .children(paragraph)
        .iter()
        .map(|child| doc.node_type(*child))
        .collect();
    assert_eq!(kinds, vec![NodeType::Image]);
}

#[test]
fn test_earliest_inline_match_wins() {
    // The link starts first, so it is claimed before the later equation.
    let doc = import("[a](b) then $x$");
    let paragraph = blocks(&doc)[0];
    let kinds: Vec<NodeType> = doc
        .children(paragraph)
        .iter()
        .map(|child| doc.node_type(*child))
        .collect();
    assert_eq!(
        kinds,
        vec![NodeType::Link, NodeType::Text, NodeType::Equation]
    );
}

#[test]
fn test_format_tags_inside_equation_are_literal() {
    let doc = import("$a*b*c$");
    let equation = find_first(&doc, NodeType::Equation).expect("equation node");
    assert_eq!(
        doc.kind(equation),
        &NodeKind::Equation {
            equation: "a*b*c".to_string(),
            inline: true,
        }
    );
    assert_eq!(round_trip("$a*b*c$"), "$a*b*c$");
}

#[test]
fn test_format_tags_inside_image_source_are_literal() {
    let doc = import("![x](https://h/_a_.png)");
    let image = find_first(&doc, NodeType::Image).expect("image node");
    assert!(matches!(
        doc.kind(image),
        NodeKind::Image { src, .. } if src == "https://h/_a_.png"
    ));

    let source = "![cat](https://x/__init__.png)";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_enclosing_format_still_applies() {
    let doc = import("**$x$**");
    let paragraph = blocks(&doc)[0];
    let kinds: Vec<NodeType> = doc
        .children(paragraph)
        .iter()
        .map(|child| doc.node_type(*child))
        .collect();
    assert_eq!(kinds, vec![NodeType::Equation]);
    assert_eq!(doc.text_content(paragraph), "x");
}

#[test]
fn test_formats_beside_a_construct_still_apply() {
    let doc = import("a *b* and $c*d$");
    let paragraph = blocks(&doc)[0];
    let italic = doc
        .children(paragraph)
        .iter()
        .find(|child| doc.text_format(**child) == Some(TextFormat::ITALIC))
        .expect("italic run");
    assert_eq!(doc.text(*italic), Some("b"));
    let equation = find_first(&doc, NodeType::Equation).expect("equation node");
    assert!(matches!(
        doc.kind(equation),
        NodeKind::Equation { equation, .. } if equation == "c*d"
    ));
}
