//! List indentation normalizer
//!
//! Nested lists are read at four spaces per level. Markdown written with
//! two-space nesting would otherwise flatten, so list lines indented by 2, 6,
//! 10… spaces are rewritten to four spaces per level before import:
//!
//! ```text
//! - a              - a
//!   - b      →         - b
//!       - c                    - c
//! ```
//!
//! Lines already indented by a multiple of four, or by an odd number of
//! spaces, are left alone.
//!
//! Fenced code blocks pass through byte for byte. The pass works on text alone
//! and holds no state between calls.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(?:[-*+]|\d+\.)(?:\s\[(?:\s|x|X)?\])?\s").unwrap());

const INDENT: &str = "    ";

pub fn normalize_list_indentation(markdown: &str) -> String {
    let text = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let mut in_code_block = false;

    let lines: Vec<String> = text
        .split('\n')
        .enumerate()
        .map(|(number, line)| {
            if line.trim().starts_with("```") {
                in_code_block = !in_code_block;
                return line.to_string();
            }
            if in_code_block {
                return line.to_string();
            }
            match reindent(line) {
                Some(rewritten) => {
                    trace!(line = number + 1, "rewrote list indentation");
                    rewritten
                }
                None => line.to_string(),
            }
        })
        .collect();

    lines.join("\n")
}

/// New text for a list line whose indent needs rewriting.
fn reindent(line: &str) -> Option<String> {
    let captures = LIST_ITEM_RE.captures(line)?;
    let leading = captures.get(1)?.as_str();

    let tabs_len = leading.len() - leading.trim_start_matches('\t').len();
    let (tabs, spaces) = leading.split_at(tabs_len);
    if spaces.chars().any(|c| c != ' ') {
        return None;
    }

    let count = spaces.len();
    if count == 0 || count % 2 != 0 || count % 4 == 0 {
        return None;
    }

    let level = count.div_ceil(2);
    Some(format!(
        "{tabs}{}{}",
        INDENT.repeat(level),
        &line[leading.len()..]
    ))
}
