//! Pipe tables
//!
//! Tables arrive one line at a time, but a table's width and header row are
//! only known once every row has been seen. The rule therefore collects the run
//! of row paragraphs sitting above the line that triggered it, removes them,
//! and builds the table in one go:
//!
//! ```text
//! | a | b |        paragraph  ─┐
//! | --- | --- |    paragraph   ├─ absorbed, divider marks `a | b` as header
//! | c |            trigger    ─┘  padded to two cells
//! ```
//!
//! If the block directly above is a table of the same width, the new rows are
//! appended to it instead. Cell text is unescaped (`\n` → newline) and parsed
//! as Markdown with the same registry, so cells may hold any inline construct.
//!
//! Export writes each cell through the registry, escapes newlines back and
//! regenerates a `| --- |` divider after every header row.

use crate::markdown::convert_from_markdown_string;
use crate::transformer::{ElementTransformer, ExportContext, ImportContext};
use crate::tree::{Document, HeaderState, NodeId, NodeKind, NodeType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static TABLE_ROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\|)(.+)(?:\|)\s?$").unwrap());
static TABLE_ROW_DIVIDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\|\s*:?-+:?\s*)+\|\s?$").unwrap());

/// One parsed line, not yet materialized.
#[derive(Debug)]
struct PendingRow {
    cells: Vec<String>,
    header: bool,
}

/// Split `| a | b |` into its raw cell texts.
fn map_to_cells(text: &str) -> Option<Vec<String>> {
    let captures = TABLE_ROW_RE.captures(text)?;
    let inner = captures.get(1)?.as_str();
    Some(inner.split('|').map(str::to_string).collect())
}

fn is_divider(text: &str) -> bool {
    TABLE_ROW_DIVIDER_RE.is_match(text)
}

/// Number of cells in the first row.
fn column_count(doc: &Document, table: NodeId) -> usize {
    match doc.first_child(table) {
        Some(row) if doc.is(row, NodeType::TableRow) => doc.children(row).len(),
        _ => 0,
    }
}

/// Text of a paragraph that holds exactly one text node.
fn single_text_paragraph(doc: &Document, node: NodeId) -> Option<&str> {
    if !doc.is(node, NodeType::Paragraph) || doc.children(node).len() != 1 {
        return None;
    }
    doc.first_child(node).and_then(|child| doc.text(child))
}

/// Whether a divider sitting at `node` has something to mark as header.
fn divider_has_target(doc: &Document, node: NodeId) -> bool {
    match doc.previous_sibling(node) {
        Some(previous) if doc.is(previous, NodeType::Table) => true,
        Some(previous) => single_text_paragraph(doc, previous)
            .is_some_and(|text| !is_divider(text) && map_to_cells(text).is_some()),
        None => false,
    }
}

fn mark_header_row(doc: &mut Document, row: NodeId) {
    for cell in doc.children(row).to_vec() {
        if let NodeKind::TableCell { header } = doc.kind_mut(cell) {
            *header = header.with_row();
        }
    }
}

fn create_cell(doc: &mut Document, text: &str, header: bool, ctx: &ImportContext) -> NodeId {
    let header = if header {
        HeaderState::Row
    } else {
        HeaderState::None
    };
    let cell = doc.create(NodeKind::TableCell { header });
    let content = text.trim().replace("\\n", "\n");
    convert_from_markdown_string(&content, ctx.registry, doc, Some(cell), false);
    cell
}

#[derive(Debug, Default)]
pub struct TableTransformer;

impl TableTransformer {
    pub fn new() -> Self {
        TableTransformer
    }
}

impl ElementTransformer for TableTransformer {
    fn name(&self) -> &str {
        "table"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::Table, NodeType::TableRow, NodeType::TableCell]
    }

    fn reg_exp(&self) -> &Regex {
        &TABLE_ROW_RE
    }

    fn export(&self, doc: &Document, node: NodeId, ctx: &ExportContext) -> Option<String> {
        if !doc.is(node, NodeType::Table) {
            return None;
        }

        let mut output = Vec::new();
        for row in doc.children(node) {
            if !doc.is(*row, NodeType::TableRow) {
                continue;
            }
            let mut row_output = Vec::new();
            let mut is_header_row = false;
            for cell in doc.children(*row) {
                let NodeKind::TableCell { header } = doc.kind(*cell) else {
                    continue;
                };
                row_output.push(
                    ctx.export_subtree(doc, *cell)
                        .replace('\n', "\\n")
                        .trim()
                        .to_string(),
                );
                is_header_row |= header.is_row();
            }
            output.push(format!("| {} |", row_output.join(" | ")));
            if is_header_row {
                let divider = vec!["---"; row_output.len()];
                output.push(format!("| {} |", divider.join(" | ")));
            }
        }
        Some(output.join("\n"))
    }

    fn replace(
        &self,
        doc: &mut Document,
        parent: NodeId,
        _children: &[NodeId],
        captures: &Captures,
        ctx: &ImportContext,
    ) -> bool {
        let line = captures.get(0).map_or("", |m| m.as_str());

        let mut rows: Vec<PendingRow> = Vec::new();
        let mut header_pending = false;
        if is_divider(line) {
            if !divider_has_target(doc, parent) {
                return false;
            }
            header_pending = true;
        } else {
            match map_to_cells(line) {
                Some(cells) => rows.push(PendingRow {
                    cells,
                    header: false,
                }),
                None => return false,
            }
        }

        let mut sibling = doc.previous_sibling(parent);
        while let Some(current) = sibling {
            let Some(text) = single_text_paragraph(doc, current) else {
                break;
            };
            if is_divider(text) {
                if header_pending || !divider_has_target(doc, current) {
                    break;
                }
                header_pending = true;
            } else {
                let Some(cells) = map_to_cells(text) else {
                    break;
                };
                rows.insert(
                    0,
                    PendingRow {
                        cells,
                        header: header_pending,
                    },
                );
                header_pending = false;
            }
            sibling = doc.previous_sibling(current);
            doc.remove(current);
        }

        let previous = doc.previous_sibling(parent);
        let previous_table = previous.filter(|node| doc.is(*node, NodeType::Table));
        if header_pending {
            if let Some(last_row) = previous_table.and_then(|table| doc.last_child(table)) {
                mark_header_row(doc, last_row);
            }
        }

        if rows.is_empty() {
            doc.remove(parent);
            if let Some(table) = previous_table {
                doc.select_end(table);
            }
            return true;
        }

        let max_cells = rows.iter().map(|row| row.cells.len()).max().unwrap_or(0);
        let table = doc.create(NodeKind::Table);
        for row in &rows {
            let table_row = doc.create(NodeKind::TableRow);
            doc.append(table, table_row);
            for index in 0..max_cells {
                let text = row.cells.get(index).map_or("", String::as_str);
                let cell = create_cell(doc, text, row.header, ctx);
                doc.append(table_row, cell);
            }
        }

        match previous_table {
            Some(existing) if column_count(doc, existing) == max_cells => {
                let new_rows = doc.children(table).to_vec();
                doc.append_all(existing, &new_rows);
                doc.remove(parent);
                debug!(rows = rows.len(), columns = max_cells, "merged rows into table");
                doc.select_end(existing);
            }
            _ => {
                doc.replace(parent, table);
                debug!(rows = rows.len(), columns = max_cells, "built table");
                doc.select_end(table);
            }
        }
        true
    }
}
