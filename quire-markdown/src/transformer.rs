//! Transformer rule definitions
//!
//! A transformer is one Markdown construct the editor understands. Rules come
//! in three shapes:
//!
//! - [`ElementTransformer`]: block constructs recognized on a whole line
//!   (headings, lists, tables, horizontal rules, embeds).
//! - [`TextMatchTransformer`]: inline constructs recognized inside a text node
//!   (images, links, emoji shortcodes, equations). They carry two patterns: the
//!   import pattern may match anywhere in a line, the live pattern must end at
//!   the caret.
//! - [`TextFormatTransformer`]: inline format tags such as `**` or `~~`.
//!
//! Every export callback returns `None` to say "this node is not mine", letting
//! the driver fall through to the next rule.

use crate::registry::TransformerRegistry;
use crate::tree::{Document, NodeId, NodeType, TextFormat};
use regex::{Captures, Regex};

/// State handed to `replace` callbacks.
#[derive(Clone, Copy)]
pub struct ImportContext<'a> {
    /// The registry driving the current conversion. Rules that recurse (table
    /// cells) convert nested content with this same registry.
    pub registry: &'a TransformerRegistry,
    /// `true` during batch import, `false` when fired by a typed character.
    pub is_import: bool,
}

/// State handed to `export` callbacks.
#[derive(Clone, Copy)]
pub struct ExportContext<'a> {
    pub registry: &'a TransformerRegistry,
    pub preserve_new_lines: bool,
}

impl ExportContext<'_> {
    /// Export the inline children of an element.
    pub fn export_children(&self, doc: &Document, node: NodeId) -> String {
        crate::markdown::export::export_children(doc, node, self)
    }

    /// Export an explicit run of inline nodes.
    pub fn export_nodes(&self, doc: &Document, nodes: &[NodeId]) -> String {
        crate::markdown::export::export_nodes(doc, nodes, self)
    }

    /// Wrap `content` in the format tags of the text node `node`.
    pub fn export_format(&self, doc: &Document, node: NodeId, content: &str) -> String {
        crate::markdown::export::export_text_format(doc, node, content, self)
    }

    /// Export every block below `node` as a standalone Markdown document.
    pub fn export_subtree(&self, doc: &Document, node: NodeId) -> String {
        crate::markdown::export::convert_to_markdown_string(
            self.registry,
            doc,
            Some(node),
            self.preserve_new_lines,
        )
    }
}

/// Block-level rule matched against a whole line.
pub trait ElementTransformer: Send + Sync {
    /// Rule name, unique within a registry (e.g. "table").
    fn name(&self) -> &str;

    /// Node kinds this rule creates or exports.
    fn dependencies(&self) -> &[NodeType];

    /// Pattern tested against the line text.
    fn reg_exp(&self) -> &Regex;

    /// Serialize `node`, or `None` when the node is not this rule's construct.
    fn export(&self, doc: &Document, node: NodeId, ctx: &ExportContext) -> Option<String>;

    /// Rewrite the tree for a matched line.
    ///
    /// `parent` is the paragraph holding the line, `children` are the inline
    /// nodes left after the matched text was removed. Returns `false` to
    /// decline, in which case the driver restores the line and tries the next
    /// rule.
    fn replace(
        &self,
        doc: &mut Document,
        parent: NodeId,
        children: &[NodeId],
        captures: &Captures,
        ctx: &ImportContext,
    ) -> bool;
}

/// Inline rule matched inside a text node.
pub trait TextMatchTransformer: Send + Sync {
    fn name(&self) -> &str;

    fn dependencies(&self) -> &[NodeType];

    /// Pattern used during import; trailing text after the match is allowed.
    fn import_reg_exp(&self) -> &Regex;

    /// Pattern used while typing; anchored at the caret.
    fn reg_exp(&self) -> &Regex;

    /// Character whose insertion re-runs the live pattern.
    fn trigger(&self) -> Option<char>;

    fn export(&self, doc: &Document, node: NodeId, ctx: &ExportContext) -> Option<String>;

    /// Replace `node`, a text node holding exactly the matched text.
    ///
    /// Returns the node now standing in its place, or `None` to leave the
    /// text untouched.
    fn replace(&self, doc: &mut Document, node: NodeId, captures: &Captures) -> Option<NodeId>;
}

/// Inline format tag such as `**` (bold) or `~~` (strikethrough).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFormatTransformer {
    pub name: &'static str,
    pub tag: &'static str,
    pub format: TextFormat,
    /// Whether the tag may open or close inside a word (`_` may not).
    pub intraword: bool,
}

impl TextFormatTransformer {
    pub const fn new(name: &'static str, tag: &'static str, format: TextFormat) -> Self {
        TextFormatTransformer {
            name,
            tag,
            format,
            intraword: true,
        }
    }

    pub const fn word_bounded(mut self) -> Self {
        self.intraword = false;
        self
    }

    /// Export only uses tags that stand for a single format.
    pub fn is_single_format(&self) -> bool {
        self.format.names().len() == 1
    }

    pub(crate) fn tag_char(&self) -> char {
        self.tag.chars().next().unwrap_or('*')
    }
}

/// A registry entry.
pub enum Transformer {
    Element(Box<dyn ElementTransformer>),
    TextFormat(TextFormatTransformer),
    TextMatch(Box<dyn TextMatchTransformer>),
}

impl Transformer {
    pub fn name(&self) -> &str {
        match self {
            Transformer::Element(t) => t.name(),
            Transformer::TextFormat(t) => t.name,
            Transformer::TextMatch(t) => t.name(),
        }
    }

    /// Short label for the rule shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Transformer::Element(_) => "element",
            Transformer::TextFormat(_) => "text-format",
            Transformer::TextMatch(_) => "text-match",
        }
    }

    pub fn dependencies(&self) -> &[NodeType] {
        match self {
            Transformer::Element(t) => t.dependencies(),
            Transformer::TextFormat(_) => &[NodeType::Text],
            Transformer::TextMatch(t) => t.dependencies(),
        }
    }

    pub fn trigger(&self) -> Option<char> {
        match self {
            Transformer::Element(_) => None,
            Transformer::TextFormat(t) => t.tag.chars().last(),
            Transformer::TextMatch(t) => t.trigger(),
        }
    }

    /// The pattern a reader would recognize the rule by.
    pub fn pattern(&self) -> String {
        match self {
            Transformer::Element(t) => t.reg_exp().as_str().to_string(),
            Transformer::TextFormat(t) => format!("{tag}…{tag}", tag = t.tag),
            Transformer::TextMatch(t) => t.import_reg_exp().as_str().to_string(),
        }
    }
}

impl std::fmt::Debug for Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformer")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}
