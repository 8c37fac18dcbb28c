//! Generic rule sets shared by every registry: block elements, inline format
//! tags and links.

pub mod elements;
pub mod text_format;
pub mod text_match;

pub use elements::{CodeTransformer, HeadingTransformer, ListTransformer, QuoteTransformer};
pub use text_format::TEXT_FORMAT_TRANSFORMERS;
pub use text_match::LinkTransformer;
