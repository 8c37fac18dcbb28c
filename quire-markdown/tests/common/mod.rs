//! Shared helpers for the integration tests.

use quire_markdown::tree::{Document, NodeId, NodeKind, NodeType};
use quire_markdown::{import_markdown, ConversionOptions, PLAYGROUND_TRANSFORMERS};

/// Import with the playground registry and default options.
pub fn import(markdown: &str) -> Document {
    import_markdown(markdown, &PLAYGROUND_TRANSFORMERS, ConversionOptions::default())
}

/// Import, then export again with the playground registry.
pub fn round_trip(markdown: &str) -> String {
    quire_markdown::reformat_markdown(
        markdown,
        &PLAYGROUND_TRANSFORMERS,
        ConversionOptions::default(),
    )
}

/// Top-level blocks of a document.
pub fn blocks(doc: &Document) -> Vec<NodeId> {
    doc.children(doc.root()).to_vec()
}

/// First node of the given type anywhere in the document.
pub fn find_first(doc: &Document, node_type: NodeType) -> Option<NodeId> {
    doc.descendants(doc.root())
        .into_iter()
        .find(|id| doc.is(*id, node_type))
}

/// Cell texts of every row of a table, with their header flags.
pub fn table_rows(doc: &Document, table: NodeId) -> Vec<Vec<(String, bool)>> {
    doc.children(table)
        .iter()
        .map(|row| {
            doc.children(*row)
                .iter()
                .map(|cell| {
                    let header = match doc.kind(*cell) {
                        NodeKind::TableCell { header } => header.is_row(),
                        _ => false,
                    };
                    (doc.text_content(*cell), header)
                })
                .collect()
        })
        .collect()
}

/// A root holding one paragraph per line, with no rules applied.
pub fn paragraphs(lines: &[&str]) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    for line in lines {
        let paragraph = doc.create_paragraph(*line);
        doc.append(root, paragraph);
    }
    doc
}
