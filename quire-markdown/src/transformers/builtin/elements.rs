//! Generic block rules: headings, quotes, code blocks and lists.

use crate::transformer::{ElementTransformer, ExportContext, ImportContext};
use crate::tree::{Document, ListType, NodeId, NodeKind, NodeType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Spaces per list nesting level.
pub const LIST_INDENT_SIZE: usize = 4;

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s").unwrap());
static QUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*```(\w{1,10})?\s").unwrap());
static CODE_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*```(\w{1,10})?\s?$").unwrap());
static UNORDERED_LIST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)[-*+]\s").unwrap());
static ORDERED_LIST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)(\d{1,})\.\s").unwrap());
static CHECK_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\s*)(?:-\s)?\s?(\[(\s|x)?\])\s").unwrap());

/// Wrap the line's remaining inline nodes in a new block that takes the
/// paragraph's place.
fn replace_with_block(doc: &mut Document, parent: NodeId, children: &[NodeId], kind: NodeKind) {
    let block = doc.create(kind);
    doc.append_all(block, children);
    doc.replace(parent, block);
    doc.select_start(block);
}

#[derive(Debug, Default)]
pub struct HeadingTransformer;

impl HeadingTransformer {
    pub fn new() -> Self {
        HeadingTransformer
    }
}

impl ElementTransformer for HeadingTransformer {
    fn name(&self) -> &str {
        "heading"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::Heading]
    }

    fn reg_exp(&self) -> &Regex {
        &HEADING_RE
    }

    fn export(&self, doc: &Document, node: NodeId, ctx: &ExportContext) -> Option<String> {
        match doc.kind(node) {
            NodeKind::Heading { level } => Some(format!(
                "{} {}",
                "#".repeat(usize::from(*level)),
                ctx.export_children(doc, node)
            )),
            _ => None,
        }
    }

    fn replace(
        &self,
        doc: &mut Document,
        parent: NodeId,
        children: &[NodeId],
        captures: &Captures,
        _ctx: &ImportContext,
    ) -> bool {
        let level = captures.get(1).map_or(1, |m| m.as_str().len()) as u8;
        replace_with_block(doc, parent, children, NodeKind::Heading { level });
        true
    }
}

#[derive(Debug, Default)]
pub struct QuoteTransformer;

impl QuoteTransformer {
    pub fn new() -> Self {
        QuoteTransformer
    }
}

impl ElementTransformer for QuoteTransformer {
    fn name(&self) -> &str {
        "quote"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::Quote]
    }

    fn reg_exp(&self) -> &Regex {
        &QUOTE_RE
    }

    fn export(&self, doc: &Document, node: NodeId, ctx: &ExportContext) -> Option<String> {
        if !doc.is(node, NodeType::Quote) {
            return None;
        }
        let lines: Vec<String> = ctx
            .export_children(doc, node)
            .split('\n')
            .map(|line| format!("> {line}"))
            .collect();
        Some(lines.join("\n"))
    }

    fn replace(
        &self,
        doc: &mut Document,
        parent: NodeId,
        children: &[NodeId],
        _captures: &Captures,
        ctx: &ImportContext,
    ) -> bool {
        // Consecutive `>` lines form one quote joined by line breaks.
        if ctx.is_import {
            if let Some(previous) = doc.previous_sibling(parent) {
                if doc.is(previous, NodeType::Quote) {
                    let line_break = doc.create(NodeKind::LineBreak);
                    doc.append(previous, line_break);
                    doc.append_all(previous, children);
                    doc.select_start(previous);
                    doc.remove(parent);
                    return true;
                }
            }
        }
        replace_with_block(doc, parent, children, NodeKind::Quote);
        true
    }
}

#[derive(Debug, Default)]
pub struct CodeTransformer;

impl CodeTransformer {
    pub fn new() -> Self {
        CodeTransformer
    }

    /// A line that opens or closes a fenced block during import.
    pub fn fence_reg_exp() -> &'static Regex {
        &CODE_FENCE_RE
    }
}

impl ElementTransformer for CodeTransformer {
    fn name(&self) -> &str {
        "code"
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::Code]
    }

    fn reg_exp(&self) -> &Regex {
        &CODE_RE
    }

    fn export(&self, doc: &Document, node: NodeId, _ctx: &ExportContext) -> Option<String> {
        let NodeKind::Code { language } = doc.kind(node) else {
            return None;
        };
        let content = doc.text_content(node);
        let body = if content.is_empty() {
            String::new()
        } else {
            format!("\n{content}")
        };
        Some(format!(
            "```{}{}\n```",
            language.as_deref().unwrap_or_default(),
            body
        ))
    }

    fn replace(
        &self,
        doc: &mut Document,
        parent: NodeId,
        children: &[NodeId],
        captures: &Captures,
        _ctx: &ImportContext,
    ) -> bool {
        let language = captures.get(1).map(|m| m.as_str().to_string());
        replace_with_block(doc, parent, children, NodeKind::Code { language });
        true
    }
}

/// Nesting depth of a list marker's leading whitespace: one level per tab,
/// one per four spaces.
pub fn list_indent(whitespace: &str) -> usize {
    let tabs = whitespace.chars().filter(|c| *c == '\t').count();
    let spaces = whitespace.chars().filter(|c| *c == ' ').count();
    tabs + spaces / LIST_INDENT_SIZE
}

fn same_list_type(a: ListType, b: ListType) -> bool {
    std::mem::discriminant(&a) == std::mem::discriminant(&b)
}

fn list_type_of(doc: &Document, node: NodeId) -> Option<ListType> {
    match doc.kind(node) {
        NodeKind::List { list_type } => Some(*list_type),
        _ => None,
    }
}

fn last_list_item(doc: &Document, list: NodeId) -> Option<NodeId> {
    doc.children(list)
        .iter()
        .rev()
        .copied()
        .find(|child| doc.is(*child, NodeType::ListItem))
}

fn nested_list(doc: &Document, item: NodeId) -> Option<NodeId> {
    doc.last_child(item)
        .filter(|child| doc.is(*child, NodeType::List))
}

/// Which list construct a [`ListTransformer`] handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListFlavour {
    Unordered,
    Ordered,
    Check,
}

/// `- item`, `1. item` and `- [ ] item`, nested by indentation.
#[derive(Debug)]
pub struct ListTransformer {
    flavour: ListFlavour,
}

impl ListTransformer {
    pub fn unordered() -> Self {
        ListTransformer {
            flavour: ListFlavour::Unordered,
        }
    }

    pub fn ordered() -> Self {
        ListTransformer {
            flavour: ListFlavour::Ordered,
        }
    }

    pub fn check() -> Self {
        ListTransformer {
            flavour: ListFlavour::Check,
        }
    }

    fn list_type(&self, captures: &Captures) -> ListType {
        match self.flavour {
            ListFlavour::Unordered => ListType::Bullet,
            ListFlavour::Check => ListType::Check,
            ListFlavour::Ordered => ListType::Number {
                start: captures
                    .get(2)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(1),
            },
        }
    }

    /// Attach `item` below the item that sits `indent - 1` levels deep in
    /// `list`, reusing a trailing nested list of the same type.
    fn nest(
        &self,
        doc: &mut Document,
        list: NodeId,
        indent: usize,
        item: NodeId,
        list_type: ListType,
    ) -> bool {
        let Some(mut host) = last_list_item(doc, list) else {
            return false;
        };
        for _ in 1..indent {
            match nested_list(doc, host).and_then(|inner| last_list_item(doc, inner)) {
                Some(deeper) => host = deeper,
                None => break,
            }
        }
        let target = match nested_list(doc, host) {
            Some(inner) if list_type_of(doc, inner).is_some_and(|t| same_list_type(t, list_type)) => {
                inner
            }
            _ => {
                let inner = doc.create(NodeKind::List { list_type });
                doc.append(host, inner);
                inner
            }
        };
        doc.append(target, item);
        true
    }
}

/// Render a list at `depth`, nested lists following their item's line.
fn export_list(doc: &Document, list: NodeId, ctx: &ExportContext, depth: usize) -> String {
    let Some(list_type) = list_type_of(doc, list) else {
        return String::new();
    };
    let mut output = Vec::new();
    let mut index = 0u32;
    for item in doc.children(list) {
        let NodeKind::ListItem { checked } = doc.kind(*item) else {
            continue;
        };
        let (nested, inline): (Vec<NodeId>, Vec<NodeId>) = doc
            .children(*item)
            .iter()
            .copied()
            .partition(|child| doc.is(*child, NodeType::List));

        if inline.is_empty() && !nested.is_empty() {
            for inner in nested {
                output.push(export_list(doc, inner, ctx, depth + 1));
            }
            continue;
        }

        let indent = " ".repeat(depth * LIST_INDENT_SIZE);
        let prefix = match list_type {
            ListType::Number { start } => format!("{}. ", start + index),
            ListType::Check => format!("- [{}] ", if checked.unwrap_or(false) { 'x' } else { ' ' }),
            ListType::Bullet => "- ".to_string(),
        };
        output.push(format!("{indent}{prefix}{}", ctx.export_nodes(doc, &inline)));
        index += 1;

        for inner in nested {
            output.push(export_list(doc, inner, ctx, depth + 1));
        }
    }
    output.join("\n")
}

impl ElementTransformer for ListTransformer {
    fn name(&self) -> &str {
        match self.flavour {
            ListFlavour::Unordered => "unordered_list",
            ListFlavour::Ordered => "ordered_list",
            ListFlavour::Check => "check_list",
        }
    }

    fn dependencies(&self) -> &[NodeType] {
        &[NodeType::List, NodeType::ListItem]
    }

    fn reg_exp(&self) -> &Regex {
        match self.flavour {
            ListFlavour::Unordered => &UNORDERED_LIST_RE,
            ListFlavour::Ordered => &ORDERED_LIST_RE,
            ListFlavour::Check => &CHECK_LIST_RE,
        }
    }

    fn export(&self, doc: &Document, node: NodeId, ctx: &ExportContext) -> Option<String> {
        let list_type = list_type_of(doc, node)?;
        let mine = match self.flavour {
            ListFlavour::Unordered => list_type == ListType::Bullet,
            ListFlavour::Check => list_type == ListType::Check,
            ListFlavour::Ordered => matches!(list_type, ListType::Number { .. }),
        };
        mine.then(|| export_list(doc, node, ctx, 0))
    }

    fn replace(
        &self,
        doc: &mut Document,
        parent: NodeId,
        children: &[NodeId],
        captures: &Captures,
        _ctx: &ImportContext,
    ) -> bool {
        let list_type = self.list_type(captures);
        let checked = match self.flavour {
            ListFlavour::Check => Some(
                captures
                    .get(3)
                    .is_some_and(|m| m.as_str().eq_ignore_ascii_case("x")),
            ),
            _ => None,
        };
        let item = doc.create(NodeKind::ListItem { checked });
        let indent = list_indent(captures.get(1).map_or("", |m| m.as_str()));

        let previous = doc.previous_sibling(parent);
        let next = doc.next_sibling(parent);
        let previous_list = previous.filter(|node| doc.is(*node, NodeType::List));
        let same_type =
            |doc: &Document, node: NodeId| list_type_of(doc, node).is_some_and(|t| same_list_type(t, list_type));

        let nested = indent > 0
            && previous_list.is_some_and(|list| self.nest(doc, list, indent, item, list_type));
        if nested {
            doc.remove(parent);
        } else if let Some(next_list) = next.filter(|node| same_type(doc, *node)) {
            match doc.first_child(next_list) {
                Some(first) => doc.insert_before(first, item),
                None => doc.append(next_list, item),
            }
            doc.remove(parent);
        } else if let Some(previous_list) = previous.filter(|node| same_type(doc, *node)) {
            doc.append(previous_list, item);
            doc.remove(parent);
        } else {
            let list = doc.create(NodeKind::List { list_type });
            doc.append(list, item);
            doc.replace(parent, list);
        }

        doc.append_all(item, children);
        doc.select_start(item);
        true
    }
}
