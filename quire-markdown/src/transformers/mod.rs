//! Rule implementations
//!
//! Each module holds one construct. The editor-specific constructs live at
//! this level; the generic block, format and link rules are under [`builtin`].

pub mod builtin;
pub mod embed;
pub mod emoji;
pub mod equation;
pub mod horizontal_rule;
pub mod image;
pub mod table;

pub use embed::EmbedTransformer;
pub use emoji::EmojiTransformer;
pub use equation::EquationTransformer;
pub use horizontal_rule::HorizontalRuleTransformer;
pub use image::ImageTransformer;
pub use table::TableTransformer;
