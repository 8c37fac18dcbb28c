//! Markdown import/export driver
//!
//! The driver owns the line loop and the fallbacks; rules only see one line (on
//! import) or one node (on export) at a time.
//!
//! # Import
//!
//! Input is read line by line. Fenced code blocks are collected verbatim.
//! Every other line becomes a paragraph holding one text node, and the
//! element rules are tried in registry order against the line. The first rule
//! whose pattern matches and whose `replace` accepts the line wins. Whatever
//! text survives goes through the inline pass: format tags first, then the
//! text-match rules. Empty paragraphs are dropped at the end unless new lines
//! are preserved.
//!
//! # Export
//!
//! Each top-level block is handed to the element rules in order; the first
//! non-`None` answer wins. Unclaimed elements fall back to their inline
//! children, where text-match rules claim non-text nodes and text nodes are
//! wrapped in their format tags.
//!
//! # Live typing
//!
//! [`shortcuts`] re-runs the caret-anchored patterns after a character is
//! typed, which is how `# ` turns into a heading or `:heart:` into a glyph.

pub mod export;
pub mod import;
mod inline;
pub mod shortcuts;

pub use export::convert_to_markdown_string;
pub use import::convert_from_markdown_string;
pub use shortcuts::{handle_text_input, type_char};

use crate::tree::{Document, NodeId, NodeType};

/// A paragraph that is empty or holds only up to three spaces.
pub(crate) fn is_empty_paragraph(doc: &Document, node: NodeId) -> bool {
    if !doc.is(node, NodeType::Paragraph) {
        return false;
    }
    match doc.children(node) {
        [] => true,
        [only] => doc
            .text(*only)
            .is_some_and(|text| text.len() <= 3 && text.chars().all(char::is_whitespace)),
        _ => false,
    }
}
