//! Ordered transformer registry
//!
//! Unlike a lookup table, a transformer registry is a sequence: when two rules
//! could claim the same text, the one registered first wins. The playground
//! registry places the specialized constructs (tables, rules, images, emoji,
//! equations, embeds) ahead of the generic block, format and link rules.

use crate::error::TransformError;
use crate::transformer::{
    ElementTransformer, TextFormatTransformer, TextMatchTransformer, Transformer,
};
use crate::transformers::{self, builtin};
use crate::tree::NodeType;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// The full editor registry, built once and shared by every conversion.
pub static PLAYGROUND_TRANSFORMERS: Lazy<TransformerRegistry> =
    Lazy::new(TransformerRegistry::playground);

/// Ordered collection of transformer rules
///
/// # Examples
///
/// ```ignore
/// let mut registry = TransformerRegistry::new();
/// registry.register_element(HorizontalRuleTransformer::new());
///
/// let rule = registry.get("horizontal_rule")?;
/// assert_eq!(rule.kind(), "element");
/// ```
pub struct TransformerRegistry {
    transformers: Vec<Transformer>,
}

impl TransformerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        TransformerRegistry {
            transformers: Vec::new(),
        }
    }

    /// Register a rule at the end of the sequence
    ///
    /// If a rule with the same name already exists, it is replaced in place and
    /// keeps its precedence.
    pub fn register(&mut self, transformer: Transformer) {
        match self.position(transformer.name()) {
            Some(index) => self.transformers[index] = transformer,
            None => self.transformers.push(transformer),
        }
    }

    pub fn register_element<T: ElementTransformer + 'static>(&mut self, transformer: T) {
        self.register(Transformer::Element(Box::new(transformer)));
    }

    pub fn register_text_match<T: TextMatchTransformer + 'static>(&mut self, transformer: T) {
        self.register(Transformer::TextMatch(Box::new(transformer)));
    }

    pub fn register_text_format(&mut self, transformer: TextFormatTransformer) {
        self.register(Transformer::TextFormat(transformer));
    }

    /// Get a rule by name
    pub fn get(&self, name: &str) -> Result<&Transformer, TransformError> {
        self.transformers
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| TransformError::TransformerNotFound(name.to_string()))
    }

    /// Check if a rule exists
    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Precedence slot of a rule; lower wins.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.transformers.iter().position(|t| t.name() == name)
    }

    /// Rule names in precedence order
    pub fn list_transformers(&self) -> Vec<String> {
        self.transformers
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transformer> {
        self.transformers.iter()
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = &dyn ElementTransformer> {
        self.transformers.iter().filter_map(|t| match t {
            Transformer::Element(rule) => Some(rule.as_ref()),
            _ => None,
        })
    }

    pub fn text_formats(&self) -> impl Iterator<Item = &TextFormatTransformer> {
        self.transformers.iter().filter_map(|t| match t {
            Transformer::TextFormat(rule) => Some(rule),
            _ => None,
        })
    }

    pub fn text_matches(&self) -> impl Iterator<Item = &dyn TextMatchTransformer> {
        self.transformers.iter().filter_map(|t| match t {
            Transformer::TextMatch(rule) => Some(rule.as_ref()),
            _ => None,
        })
    }

    /// Every node kind some registered rule depends on.
    pub fn node_types(&self) -> BTreeSet<NodeType> {
        self.transformers
            .iter()
            .flat_map(|t| t.dependencies().iter().copied())
            .collect()
    }

    /// The editor registry with the default image width
    pub fn playground() -> Self {
        Self::playground_with(transformers::image::DEFAULT_IMAGE_MAX_WIDTH)
    }

    /// The editor registry, with images created at `image_max_width`
    pub fn playground_with(image_max_width: u32) -> Self {
        let mut registry = Self::new();

        registry.register_element(transformers::table::TableTransformer::new());
        registry.register_element(transformers::horizontal_rule::HorizontalRuleTransformer::new());
        registry.register_text_match(
            transformers::image::ImageTransformer::new().with_max_width(image_max_width),
        );
        registry.register_text_match(transformers::emoji::EmojiTransformer::new());
        registry.register_text_match(transformers::equation::EquationTransformer::new());
        registry.register_element(transformers::embed::EmbedTransformer::tweet());

        registry.register_element(builtin::elements::ListTransformer::check());
        registry.register_element(builtin::elements::HeadingTransformer::new());
        registry.register_element(builtin::elements::QuoteTransformer::new());
        registry.register_element(builtin::elements::CodeTransformer::new());
        registry.register_element(builtin::elements::ListTransformer::unordered());
        registry.register_element(builtin::elements::ListTransformer::ordered());
        for format in builtin::text_format::TEXT_FORMAT_TRANSFORMERS {
            registry.register_text_format(format);
        }
        registry.register_text_match(builtin::text_match::LinkTransformer::new());

        registry
    }
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::playground()
    }
}

impl std::fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.transformers.iter()).finish()
    }
}
