//! Document tree consumed and produced by the Markdown transformers.
//!
//! This is the slice of a rich-text editor's document model that the
//! transformers need: typed nodes, sibling navigation, in-place structural
//! edits and a caret. Nodes are modelled as a closed sum type so every rule's
//! export is a total match with a "not mine" default arm.

pub mod document;
pub mod nodes;

pub use document::{Document, Selection};
pub use nodes::{HeaderState, ListType, NodeId, NodeKind, NodeSnapshot, NodeType, TextFormat};
