//! Live typing: each character goes through `type_char`.

use crate::common::blocks;
use quire_markdown::markdown::type_char;
use quire_markdown::tree::{Document, NodeId, NodeKind, NodeType, Selection, TextFormat};
use quire_markdown::PLAYGROUND_TRANSFORMERS;

/// Type `text` at the end of `node` until a rule consumes the node.
fn type_into(doc: &mut Document, node: NodeId, text: &str) {
    for ch in text.chars() {
        if !doc.is_attached(node) {
            return;
        }
        let offset = doc.text(node).map_or(0, str::len);
        type_char(doc, &PLAYGROUND_TRANSFORMERS, node, offset, ch);
    }
}

/// Empty document with one empty paragraph; returns the paragraph's text node.
fn empty_paragraph(doc: &mut Document) -> NodeId {
    let root = doc.root();
    let paragraph = doc.create_paragraph("");
    doc.append(root, paragraph);
    doc.first_child(paragraph).unwrap()
}

#[test]
fn test_dashes_and_space_make_a_rule() {
    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    type_into(&mut doc, node, "--- ");

    let kinds: Vec<NodeType> = blocks(&doc).iter().map(|b| doc.node_type(*b)).collect();
    assert_eq!(kinds, vec![NodeType::HorizontalRule]);
}

#[test]
fn test_rule_typed_above_content_keeps_the_paragraph() {
    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    let root = doc.root();
    let following = doc.create_paragraph("after");
    doc.append(root, following);

    type_into(&mut doc, node, "--- ");

    let kinds: Vec<NodeType> = blocks(&doc).iter().map(|b| doc.node_type(*b)).collect();
    assert_eq!(
        kinds,
        vec![NodeType::HorizontalRule, NodeType::Paragraph, NodeType::Paragraph]
    );
    assert_eq!(doc.text_content(blocks(&doc)[2]), "after");
}

#[test]
fn test_closing_colon_inserts_emoji() {
    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    let paragraph = doc.parent(node).unwrap();
    type_into(&mut doc, node, "I :heart:");

    assert_eq!(doc.text_content(paragraph), "I \u{2764}\u{FE0F}");
    let glyph = doc.last_child(paragraph).unwrap();
    assert_eq!(doc.selection(), Some(Selection::After(glyph)));
}

#[test]
fn test_unknown_shortcode_is_left_as_typed() {
    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    let paragraph = doc.parent(node).unwrap();
    type_into(&mut doc, node, "a :nope:");

    assert_eq!(doc.children(paragraph).len(), 1);
    assert_eq!(doc.text_content(paragraph), "a :nope:");
}

#[test]
fn test_closing_dollar_inserts_equation() {
    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    let paragraph = doc.parent(node).unwrap();
    type_into(&mut doc, node, "$x^2$");

    let equation = doc.first_child(paragraph).unwrap();
    assert_eq!(
        doc.kind(equation),
        &NodeKind::Equation {
            equation: "x^2".to_string(),
            inline: true,
        }
    );
}

#[test]
fn test_closing_paren_inserts_image_or_link() {
    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    let paragraph = doc.parent(node).unwrap();
    type_into(&mut doc, node, "![cat](cat.png)");
    assert!(doc.is(doc.first_child(paragraph).unwrap(), NodeType::Image));

    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    let paragraph = doc.parent(node).unwrap();
    type_into(&mut doc, node, "[home](https://example.com)");
    let link = doc.first_child(paragraph).unwrap();
    assert_eq!(
        doc.kind(link),
        &NodeKind::Link {
            url: "https://example.com".to_string()
        }
    );
    assert_eq!(doc.text_content(link), "home");
}

#[test]
fn test_tweet_tag_becomes_embed() {
    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    type_into(&mut doc, node, "<tweet id=\"42\" /> ");

    let block = blocks(&doc)[0];
    assert_eq!(
        doc.kind(block),
        &NodeKind::Embed {
            tag: "tweet".to_string(),
            id: "42".to_string(),
        }
    );
}

#[test]
fn test_strikethrough_shortcut() {
    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    let paragraph = doc.parent(node).unwrap();
    type_into(&mut doc, node, "~~old~~");

    let children = doc.children(paragraph);
    assert_eq!(children.len(), 1);
    assert_eq!(doc.text(children[0]), Some("old"));
    assert_eq!(doc.text_format(children[0]), Some(TextFormat::STRIKETHROUGH));
}

#[test]
fn test_underscore_inside_words_is_not_italic() {
    let mut doc = Document::new();
    let node = empty_paragraph(&mut doc);
    let paragraph = doc.parent(node).unwrap();
    type_into(&mut doc, node, "snake_case_");

    assert_eq!(doc.children(paragraph).len(), 1);
    assert_eq!(doc.text_content(paragraph), "snake_case_");
}
