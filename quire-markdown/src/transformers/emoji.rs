//! Emoji shortcodes: `:heart:` becomes the glyph as plain text.
//!
//! Converted emoji are ordinary text, so this rule never exports anything.

use crate::emoji::find_emoji;
use crate::transformer::{ExportContext, TextMatchTransformer};
use crate::tree::{Document, NodeId, NodeType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static EMOJI_IMPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r":([a-z0-9_]+):").unwrap());
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r":([a-z0-9_]+):$").unwrap());

#[derive(Debug, Default)]
pub struct EmojiTransformer;

impl EmojiTransformer {
    pub fn new() -> Self {
        EmojiTransformer
    }
}

impl TextMatchTransformer for EmojiTransformer {
    fn name(&self) -> &str {
        "emoji"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::Text]
    }

    fn import_reg_exp(&self) -> &Regex {
        &EMOJI_IMPORT_RE
    }

    fn reg_exp(&self) -> &Regex {
        &EMOJI_RE
    }

    fn trigger(&self) -> Option<char> {
        Some(':')
    }

    fn export(&self, _doc: &Document, _node: NodeId, _ctx: &ExportContext) -> Option<String> {
        None
    }

    fn replace(&self, doc: &mut Document, node: NodeId, captures: &Captures) -> Option<NodeId> {
        let glyph = find_emoji(captures.get(1)?.as_str())?;
        let text = doc.create_text(glyph);
        doc.replace(node, text);
        Some(text)
    }
}
