//! Conversion pipeline
//!
//! Thin functional wrappers over the driver that apply the indentation
//! normalizer around import and export, the way a host application calls them.

use crate::markdown::{convert_from_markdown_string, convert_to_markdown_string};
use crate::normalize::normalize_list_indentation;
use crate::registry::TransformerRegistry;
use crate::tree::Document;
use tracing::debug;

/// How Markdown is read into, and written out of, a document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Rewrite two-space list nesting before import.
    pub normalize_on_import: bool,
    /// Run the same rewrite over exported text.
    pub normalize_on_export: bool,
    /// Keep blank lines as empty paragraphs and join blocks with one newline.
    pub preserve_new_lines: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            normalize_on_import: true,
            normalize_on_export: false,
            preserve_new_lines: false,
        }
    }
}

/// Parse Markdown into a new document.
///
/// # Example
///
/// ```ignore
/// use quire_markdown::{import_markdown, ConversionOptions, PLAYGROUND_TRANSFORMERS};
///
/// let doc = import_markdown("# Title", &PLAYGROUND_TRANSFORMERS, ConversionOptions::default());
/// assert_eq!(doc.children(doc.root()).len(), 1);
/// ```
pub fn import_markdown(
    source: &str,
    registry: &TransformerRegistry,
    options: ConversionOptions,
) -> Document {
    let source = if options.normalize_on_import {
        normalize_list_indentation(source)
    } else {
        source.to_string()
    };

    let mut doc = Document::new();
    convert_from_markdown_string(&source, registry, &mut doc, None, options.preserve_new_lines);
    debug!(blocks = doc.children(doc.root()).len(), "imported markdown");
    doc
}

/// Serialize a whole document to Markdown.
pub fn export_markdown(
    doc: &Document,
    registry: &TransformerRegistry,
    options: ConversionOptions,
) -> String {
    let output = convert_to_markdown_string(registry, doc, None, options.preserve_new_lines);
    if options.normalize_on_export {
        normalize_list_indentation(&output)
    } else {
        output
    }
}

/// Round trip: import, then export with the same registry and options.
///
/// Useful for canonicalizing Markdown and for testing.
pub fn reformat_markdown(
    source: &str,
    registry: &TransformerRegistry,
    options: ConversionOptions,
) -> String {
    let doc = import_markdown(source, registry, options);
    export_markdown(&doc, registry, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_normalizes_two_space_lists_by_default() {
        let registry = TransformerRegistry::playground();
        let nested = reformat_markdown("- a\n  - b", &registry, ConversionOptions::default());
        assert_eq!(nested, "- a\n    - b");

        let flat = reformat_markdown(
            "- a\n  - b",
            &registry,
            ConversionOptions {
                normalize_on_import: false,
                ..ConversionOptions::default()
            },
        );
        assert_eq!(flat, "- a\n- b");
    }

    #[test]
    fn preserved_new_lines_survive_a_round_trip() {
        let registry = TransformerRegistry::playground();
        let options = ConversionOptions {
            preserve_new_lines: true,
            ..ConversionOptions::default()
        };
        assert_eq!(reformat_markdown("a\n\n\nb", &registry, options), "a\n\n\nb");
    }
}
