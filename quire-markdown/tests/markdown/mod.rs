//! Markdown transformer tests
//!
//! Tests for Markdown ↔ document tree conversion through the playground registry.

mod constructs;
mod emoji;
mod precedence;
mod shortcuts;
mod table;
