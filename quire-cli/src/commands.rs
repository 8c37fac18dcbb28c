//! CLI-specific commands
//!
//! Thin wrappers over quire-markdown that turn a source string into the text a
//! command prints. They do no I/O so the binary's tests can call them directly.
//!
//! ## Output conventions
//!
//! - Tree dumps and rule listings always end with a newline.
//! - Exported Markdown ends with exactly one newline, unless the document is empty.
//! - Normalized Markdown keeps the input's line structure byte for byte, including
//!   whether it ends with a newline.

use quire_markdown::inspect::{render, rules_to_json, rules_to_text, InspectFormat};
use quire_markdown::{
    import_markdown, reformat_markdown, ConversionOptions, TransformError, TransformerRegistry,
};
use tracing::debug;

/// Formats accepted by `quire import --format`
pub const INSPECT_FORMATS: &[&str] = &["treeviz", "json"];

fn with_trailing_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Import `source` and dump the resulting tree.
pub fn import_tree(
    source: &str,
    registry: &TransformerRegistry,
    options: ConversionOptions,
    format: InspectFormat,
) -> Result<String, TransformError> {
    let doc = import_markdown(source, registry, options);
    debug!(format = format.name(), "rendering tree");
    render(&doc, format).map(with_trailing_newline)
}

/// Import `source` and export it again.
pub fn export_markdown(
    source: &str,
    registry: &TransformerRegistry,
    options: ConversionOptions,
) -> String {
    with_trailing_newline(reformat_markdown(source, registry, options))
}

/// Registry listing, as an aligned table or as JSON.
pub fn list_rules(registry: &TransformerRegistry, json: bool) -> Result<String, TransformError> {
    if json {
        rules_to_json(registry).map(with_trailing_newline)
    } else {
        Ok(rules_to_text(registry))
    }
}
