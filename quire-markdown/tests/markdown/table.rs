use crate::common::{blocks, find_first, import, paragraphs, round_trip, table_rows};
use comrak::nodes::NodeValue;
use comrak::{parse_document, Arena, Options};
use quire_markdown::markdown::type_char;
use quire_markdown::tree::{NodeKind, NodeType};
use quire_markdown::PLAYGROUND_TRANSFORMERS;

const SIMPLE_TABLE: &str = "| a | b |\n| --- | --- |\n| c | d |";

fn cells(rows: &[(&str, bool)]) -> Vec<(String, bool)> {
    rows.iter()
        .map(|(text, header)| (text.to_string(), *header))
        .collect()
}

#[test]
fn test_table_round_trip() {
    let doc = import(SIMPLE_TABLE);
    let blocks = blocks(&doc);
    assert_eq!(blocks.len(), 1);
    assert_eq!(doc.kind(blocks[0]), &NodeKind::Table);

    let rows = table_rows(&doc, blocks[0]);
    assert_eq!(
        rows,
        vec![
            cells(&[("a", true), ("b", true)]),
            cells(&[("c", false), ("d", false)]),
        ]
    );

    // The divider is regenerated from the header flags.
    assert_eq!(round_trip(SIMPLE_TABLE), SIMPLE_TABLE);
}

#[test]
fn test_exported_table_is_gfm() {
    let markdown = round_trip("| Name | Qty |\n| :-- | --: |\n| apple | 3 |\n| pear | 5 |");
    assert_eq!(
        markdown,
        "| Name | Qty |\n| --- | --- |\n| apple | 3 |\n| pear | 5 |"
    );

    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.table = true;
    let root = parse_document(&arena, &markdown, &options);

    let tables = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Table(..)))
        .count();
    let rows = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::TableRow(..)))
        .count();
    assert_eq!(tables, 1);
    assert_eq!(rows, 3);
}

#[test]
fn test_matching_rows_merge_into_one_table() {
    let doc = import("| a | b |\n| c | d |\n| e | f |");
    let blocks = blocks(&doc);
    assert_eq!(blocks.len(), 1);
    assert_eq!(doc.children(blocks[0]).len(), 3);
}

#[test]
fn test_width_change_starts_a_new_table() {
    let source = "| a | b |\n| c |";
    let doc = import(source);
    let tables: Vec<_> = blocks(&doc)
        .into_iter()
        .filter(|block| doc.is(*block, NodeType::Table))
        .collect();
    assert_eq!(tables.len(), 2);
    assert_eq!(round_trip(source), "| a | b |\n\n| c |");
}

#[test]
fn test_ragged_rows_are_padded() {
    let mut doc = paragraphs(&["| a | b | c |", "| d |"]);
    let last = blocks(&doc)[1];
    let text = doc.first_child(last).unwrap();
    let end = doc.text(text).unwrap().len();

    // A space after the closing pipe completes the row and absorbs the one above.
    assert!(type_char(&mut doc, &PLAYGROUND_TRANSFORMERS, text, end, ' '));

    let blocks = blocks(&doc);
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        table_rows(&doc, blocks[0]),
        vec![
            cells(&[("a", false), ("b", false), ("c", false)]),
            cells(&[("d", false), ("", false), ("", false)]),
        ]
    );
}

#[test]
fn test_divider_typed_below_rows_marks_header() {
    let mut doc = paragraphs(&["| a | b |", "| c | d |", "| --- | --- |"]);
    let last = blocks(&doc)[2];
    let text = doc.first_child(last).unwrap();
    let end = doc.text(text).unwrap().len();
    assert!(type_char(&mut doc, &PLAYGROUND_TRANSFORMERS, text, end, ' '));

    let blocks = blocks(&doc);
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        table_rows(&doc, blocks[0]),
        vec![
            cells(&[("a", false), ("b", false)]),
            cells(&[("c", true), ("d", true)]),
        ]
    );
}

#[test]
fn test_lone_divider_is_plain_text() {
    let doc = import("| --- | --- |");
    let block = blocks(&doc)[0];
    assert!(doc.is(block, NodeType::Paragraph));
    assert_eq!(doc.text_content(block), "| --- | --- |");
}

#[test]
fn test_cells_hold_inline_markdown() {
    let doc = import("| **bold** | :heart: | ![i](i.png) |");
    let table = blocks(&doc)[0];
    assert_eq!(
        table_rows(&doc, table)[0]
            .iter()
            .map(|(text, _)| text.as_str())
            .collect::<Vec<_>>(),
        vec!["bold", "\u{2764}\u{FE0F}", "i"]
    );
    assert!(find_first(&doc, NodeType::Image).is_some());
    assert_eq!(
        round_trip("| **bold** | x |"),
        "| **bold** | x |"
    );
}

#[test]
fn test_escaped_newline_splits_cell_content() {
    let doc = import(r"| one\ntwo | x |");
    let table = blocks(&doc)[0];
    let first_cell = doc.first_child(doc.first_child(table).unwrap()).unwrap();
    assert_eq!(doc.children(first_cell).len(), 2);
    assert_eq!(doc.text_content(first_cell), "one\ntwo");
}

#[test]
fn test_multi_paragraph_cell_export_is_stable() {
    // Cell paragraphs export with a blank line between them, which reads back
    // as the same two paragraphs.
    let once = round_trip(r"| a\nb | c |");
    assert_eq!(once, r"| a\n\nb | c |");
    assert_eq!(round_trip(&once), once);

    let doc = import(&once);
    let table = blocks(&doc)[0];
    let first_cell = doc.first_child(doc.first_child(table).unwrap()).unwrap();
    assert_eq!(doc.children(first_cell).len(), 2);
}
