//! Inline format tags, in matching precedence.
//!
//! Longer tags come before their prefixes so `***` is not read as `**` + `*`.
//! Combined tags (`***`, `___`) are import-only; export composes them from the
//! single-format tags.

use crate::transformer::TextFormatTransformer;
use crate::tree::TextFormat;

pub const INLINE_CODE: TextFormatTransformer =
    TextFormatTransformer::new("inline_code", "`", TextFormat::CODE);

pub const BOLD_ITALIC_STAR: TextFormatTransformer = TextFormatTransformer::new(
    "bold_italic_star",
    "***",
    TextFormat::BOLD.union(TextFormat::ITALIC),
);

pub const BOLD_ITALIC_UNDERSCORE: TextFormatTransformer = TextFormatTransformer::new(
    "bold_italic_underscore",
    "___",
    TextFormat::BOLD.union(TextFormat::ITALIC),
)
.word_bounded();

pub const BOLD_STAR: TextFormatTransformer =
    TextFormatTransformer::new("bold_star", "**", TextFormat::BOLD);

pub const BOLD_UNDERSCORE: TextFormatTransformer =
    TextFormatTransformer::new("bold_underscore", "__", TextFormat::BOLD).word_bounded();

pub const HIGHLIGHT: TextFormatTransformer =
    TextFormatTransformer::new("highlight", "==", TextFormat::HIGHLIGHT);

pub const ITALIC_STAR: TextFormatTransformer =
    TextFormatTransformer::new("italic_star", "*", TextFormat::ITALIC);

pub const ITALIC_UNDERSCORE: TextFormatTransformer =
    TextFormatTransformer::new("italic_underscore", "_", TextFormat::ITALIC).word_bounded();

pub const STRIKETHROUGH: TextFormatTransformer =
    TextFormatTransformer::new("strikethrough", "~~", TextFormat::STRIKETHROUGH);

pub const TEXT_FORMAT_TRANSFORMERS: [TextFormatTransformer; 9] = [
    INLINE_CODE,
    BOLD_ITALIC_STAR,
    BOLD_ITALIC_UNDERSCORE,
    BOLD_STAR,
    BOLD_UNDERSCORE,
    HIGHLIGHT,
    ITALIC_STAR,
    ITALIC_UNDERSCORE,
    STRIKETHROUGH,
];
