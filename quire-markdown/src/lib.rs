//! Markdown transformers for the quire rich-text document tree
//!
//!     This crate converts between a structured editor document and flat Markdown text, in both
//!     directions, through an ordered registry of per-construct rules. It also ships the
//!     list-indentation normalizer applied to raw Markdown before import.
//!
//!     TLDR: For rule authors:
//!         - A rule recognizes one construct by a pattern and serializes one node kind back.
//!         - Export callbacks return None for nodes that are not theirs; the next rule is tried.
//!         - Replace callbacks either rewrite the tree and return success, or leave it alone.
//!         - Registry order is precedence. Specialized rules go before generic ones.
//!         - Each rule carries unit tests for its patterns; round trips live under tests/.
//!
//! Architecture
//!
//!     The document model (./tree) is a small arena: nodes refer to each other through stable
//!     ids, so a rule may detach siblings while it is still walking them. Rules (./transformers)
//!     are stateless values behind three traits (./transformer.rs). The driver (./markdown) owns
//!     the line loop, the inline pass and every fallback, and is the only code that decides which
//!     rule runs.
//!
//!     This is a pure lib: no code here prints, reads files or looks at the environment.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── transformer.rs          # Rule traits and the registry entry type
//!     ├── registry.rs             # Ordered registry, PLAYGROUND_TRANSFORMERS
//!     ├── transformers
//!     │   ├── <construct>.rs      # table, horizontal_rule, image, emoji, equation, embed
//!     │   └── builtin             # headings, quotes, code, lists, format tags, links
//!     ├── markdown
//!     │   ├── import.rs           # Markdown → tree
//!     │   ├── inline.rs           # Format tags and text-match rules inside a line
//!     │   ├── export.rs           # Tree → Markdown
//!     │   └── shortcuts.rs        # Live typing
//!     ├── normalize.rs            # List indentation pre/post pass
//!     ├── transforms.rs           # Pipeline helpers with options
//!     ├── inspect.rs              # Treeviz, JSON, rule listings
//!     ├── emoji.rs                # Shortcode table
//!     └── tree                    # Document arena and node kinds
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── markdown
//!     │   └── <area>.rs
//!     └── normalize.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are declared
//!     as modules from tests/lib.rs.
//!
//! Core Algorithms
//!
//!     The interesting rule is the table (./transformers/table.rs): a table is only complete once
//!     every row has been seen, so the rule absorbs the run of row paragraphs above the line that
//!     triggered it and materializes the table once, merging into a table of the same width right
//!     above it.
//!
//!     Everything else is pattern matching with two patterns per inline construct: an import
//!     pattern that may match anywhere in a line and a live pattern anchored at the caret.
//!
pub mod emoji;
pub mod error;
pub mod inspect;
pub mod markdown;
pub mod normalize;
pub mod registry;
pub mod transformer;
pub mod transformers;
pub mod transforms;
pub mod tree;

pub use error::TransformError;
pub use markdown::{convert_from_markdown_string, convert_to_markdown_string};
pub use normalize::normalize_list_indentation;
pub use registry::{TransformerRegistry, PLAYGROUND_TRANSFORMERS};
pub use transformer::{
    ElementTransformer, ExportContext, ImportContext, TextFormatTransformer,
    TextMatchTransformer, Transformer,
};
pub use transforms::{export_markdown, import_markdown, reformat_markdown, ConversionOptions};
pub use tree::{Document, NodeId, NodeKind, NodeSnapshot, NodeType, Selection, TextFormat};
