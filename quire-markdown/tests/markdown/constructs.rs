use crate::common::{blocks, find_first, import, round_trip};
use quire_markdown::tree::{ListType, NodeKind, NodeSnapshot, NodeType, TextFormat};
use quire_markdown::{export_markdown, ConversionOptions, Document, PLAYGROUND_TRANSFORMERS};

#[test]
fn test_horizontal_rule_round_trip() {
    let doc = import("---");
    let block = blocks(&doc)[0];
    assert_eq!(doc.kind(block), &NodeKind::HorizontalRule);

    // Every marker is written back as `***`.
    assert_eq!(round_trip("---"), "***");
    assert_eq!(round_trip("___"), "***");
    assert_eq!(round_trip("***"), "***");
}

#[test]
fn test_image_export_and_reimport() {
    let doc = Document::from_blocks(&[NodeSnapshot::with_children(
        NodeKind::Paragraph,
        vec![NodeSnapshot::leaf(NodeKind::Image {
            alt: "cat".to_string(),
            src: "https://x/y.png".to_string(),
            max_width: 800,
        })],
    )]);
    let markdown = export_markdown(&doc, &PLAYGROUND_TRANSFORMERS, ConversionOptions::default());
    assert_eq!(markdown, "![cat](https://x/y.png)");

    let reimported = import(&markdown);
    let image = find_first(&reimported, NodeType::Image).expect("image node");
    assert_eq!(
        reimported.kind(image),
        &NodeKind::Image {
            alt: "cat".to_string(),
            src: "https://x/y.png".to_string(),
            max_width: 800,
        }
    );
}

#[test]
fn test_image_inside_text() {
    let doc = import("before ![a](b.png) after");
    let paragraph = blocks(&doc)[0];
    let kinds: Vec<NodeType> = doc
        .children(paragraph)
        .iter()
        .map(|child| doc.node_type(*child))
        .collect();
    assert_eq!(kinds, vec![NodeType::Text, NodeType::Image, NodeType::Text]);
    assert_eq!(round_trip("before ![a](b.png) after"), "before ![a](b.png) after");
}

#[test]
fn test_equation_round_trip() {
    let doc = import("Euler: $e^{i\\pi}+1=0$");
    let equation = find_first(&doc, NodeType::Equation).expect("equation node");
    assert_eq!(
        doc.kind(equation),
        &NodeKind::Equation {
            equation: "e^{i\\pi}+1=0".to_string(),
            inline: true,
        }
    );
    assert_eq!(round_trip("Euler: $e^{i\\pi}+1=0$"), "Euler: $e^{i\\pi}+1=0$");
}

#[test]
fn test_tweet_embed_round_trip() {
    let doc = import("<tweet id=\"1234567890\" />");
    let block = blocks(&doc)[0];
    assert_eq!(
        doc.kind(block),
        &NodeKind::Embed {
            tag: "tweet".to_string(),
            id: "1234567890".to_string(),
        }
    );
    assert_eq!(
        round_trip("<tweet id=\"1234567890\" />"),
        "<tweet id=\"1234567890\" />"
    );
}

#[test]
fn test_headings_quotes_and_code() {
    let source = "# Title\n\n> quoted\n\n```rust\nfn main() {}\n```";
    let doc = import(source);
    let kinds: Vec<&NodeKind> = blocks(&doc).into_iter().map(|b| doc.kind(b)).collect();
    assert_eq!(
        kinds,
        vec![
            &NodeKind::Heading { level: 1 },
            &NodeKind::Quote,
            &NodeKind::Code {
                language: Some("rust".to_string())
            },
        ]
    );
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_nested_lists() {
    let source = "- a\n- b\n    - c\n\n3. three\n4. four\n\n- [x] done\n- [ ] todo";
    let doc = import(source);
    let lists: Vec<ListType> = blocks(&doc)
        .into_iter()
        .filter_map(|b| match doc.kind(b) {
            NodeKind::List { list_type } => Some(*list_type),
            _ => None,
        })
        .collect();
    assert_eq!(
        lists,
        vec![ListType::Bullet, ListType::Number { start: 3 }, ListType::Check]
    );
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_inline_formats() {
    let source = "a **bold** and *it* and `code` and ~~gone~~ and ==mark==";
    let doc = import(source);
    let paragraph = blocks(&doc)[0];
    let formatted: Vec<(String, TextFormat)> = doc
        .children(paragraph)
        .iter()
        .filter_map(|child| {
            let format = doc.text_format(*child)?;
            (!format.is_empty()).then(|| (doc.text_content(*child), format))
        })
        .collect();
    assert_eq!(
        formatted,
        vec![
            ("bold".to_string(), TextFormat::BOLD),
            ("it".to_string(), TextFormat::ITALIC),
            ("code".to_string(), TextFormat::CODE),
            ("gone".to_string(), TextFormat::STRIKETHROUGH),
            ("mark".to_string(), TextFormat::HIGHLIGHT),
        ]
    );
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_code_spans_are_literal() {
    let doc = import("`:heart: **x**`");
    let paragraph = blocks(&doc)[0];
    assert_eq!(doc.children(paragraph).len(), 1);
    assert_eq!(doc.text_content(paragraph), ":heart: **x**");
}

#[test]
fn test_link_round_trip() {
    let source = "see [the docs](https://example.com/docs) now";
    let doc = import(source);
    let link = find_first(&doc, NodeType::Link).expect("link node");
    assert_eq!(
        doc.kind(link),
        &NodeKind::Link {
            url: "https://example.com/docs".to_string()
        }
    );
    assert_eq!(doc.text_content(link), "the docs");
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_blank_lines_collapse_unless_preserved() {
    assert_eq!(round_trip("one\n\n\n\ntwo"), "one\n\ntwo");

    let preserved = quire_markdown::reformat_markdown(
        "one\n\n\n\ntwo",
        &PLAYGROUND_TRANSFORMERS,
        ConversionOptions {
            preserve_new_lines: true,
            ..ConversionOptions::default()
        },
    );
    assert_eq!(preserved, "one\n\n\n\ntwo");
}
