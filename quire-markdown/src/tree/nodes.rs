//! Node kinds and their attribute payloads.

use serde::{Serialize, Serializer};

/// Stable handle to a node inside a [`Document`](super::Document) arena.
///
/// Ids stay valid after the node is detached, so a rule may keep referring to a
/// node it has just removed from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind tag without payload, used for rule dependencies and quick dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Root,
    Paragraph,
    Heading,
    Quote,
    List,
    ListItem,
    Code,
    Text,
    LineBreak,
    Link,
    HorizontalRule,
    Image,
    Equation,
    Embed,
    Table,
    TableRow,
    TableCell,
}

impl NodeType {
    pub fn name(self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::Paragraph => "paragraph",
            NodeType::Heading => "heading",
            NodeType::Quote => "quote",
            NodeType::List => "list",
            NodeType::ListItem => "list_item",
            NodeType::Code => "code",
            NodeType::Text => "text",
            NodeType::LineBreak => "line_break",
            NodeType::Link => "link",
            NodeType::HorizontalRule => "horizontal_rule",
            NodeType::Image => "image",
            NodeType::Equation => "equation",
            NodeType::Embed => "embed",
            NodeType::Table => "table",
            NodeType::TableRow => "table_row",
            NodeType::TableCell => "table_cell",
        }
    }

    /// Element nodes own children; everything else is a leaf.
    pub fn is_element(self) -> bool {
        matches!(
            self,
            NodeType::Root
                | NodeType::Paragraph
                | NodeType::Heading
                | NodeType::Quote
                | NodeType::List
                | NodeType::ListItem
                | NodeType::Code
                | NodeType::Link
                | NodeType::Table
                | NodeType::TableRow
                | NodeType::TableCell
        )
    }

    /// Opaque leaves rendered by the host (rules, images, equations, embeds).
    pub fn is_decorator(self) -> bool {
        matches!(
            self,
            NodeType::HorizontalRule | NodeType::Image | NodeType::Equation | NodeType::Embed
        )
    }
}

/// Inline formatting flags carried by text nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextFormat(u8);

impl TextFormat {
    pub const BOLD: TextFormat = TextFormat(1);
    pub const ITALIC: TextFormat = TextFormat(1 << 1);
    pub const STRIKETHROUGH: TextFormat = TextFormat(1 << 2);
    pub const CODE: TextFormat = TextFormat(1 << 3);
    pub const HIGHLIGHT: TextFormat = TextFormat(1 << 4);

    const NAMED: [(TextFormat, &'static str); 5] = [
        (TextFormat::BOLD, "bold"),
        (TextFormat::ITALIC, "italic"),
        (TextFormat::STRIKETHROUGH, "strikethrough"),
        (TextFormat::CODE, "code"),
        (TextFormat::HIGHLIGHT, "highlight"),
    ];

    pub const fn empty() -> Self {
        TextFormat(0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: TextFormat) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: TextFormat) {
        self.0 |= other.0;
    }

    pub const fn union(self, other: TextFormat) -> TextFormat {
        TextFormat(self.0 | other.0)
    }

    pub fn names(self) -> Vec<&'static str> {
        TextFormat::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Serialize for TextFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

/// Header role of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderState {
    #[default]
    None,
    Row,
    Column,
    Both,
}

impl HeaderState {
    pub fn is_row(self) -> bool {
        matches!(self, HeaderState::Row | HeaderState::Both)
    }

    pub fn is_column(self) -> bool {
        matches!(self, HeaderState::Column | HeaderState::Both)
    }

    /// Sets the row bit, keeping an existing column bit.
    pub fn with_row(self) -> HeaderState {
        if self.is_column() {
            HeaderState::Both
        } else {
            HeaderState::Row
        }
    }
}

/// Flavour of a list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    Bullet,
    Number { start: u32 },
    Check,
}

/// A node kind together with its attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading {
        level: u8,
    },
    Quote,
    List {
        list_type: ListType,
    },
    ListItem {
        checked: Option<bool>,
    },
    Code {
        language: Option<String>,
    },
    Text {
        text: String,
        format: TextFormat,
    },
    LineBreak,
    Link {
        url: String,
    },
    HorizontalRule,
    Image {
        alt: String,
        src: String,
        max_width: u32,
    },
    Equation {
        equation: String,
        inline: bool,
    },
    /// Opaque third-party embed addressed by an identifier, e.g. `<tweet id="…" />`.
    Embed {
        tag: String,
        id: String,
    },
    Table,
    TableRow,
    TableCell {
        header: HeaderState,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Root => NodeType::Root,
            NodeKind::Paragraph => NodeType::Paragraph,
            NodeKind::Heading { .. } => NodeType::Heading,
            NodeKind::Quote => NodeType::Quote,
            NodeKind::List { .. } => NodeType::List,
            NodeKind::ListItem { .. } => NodeType::ListItem,
            NodeKind::Code { .. } => NodeType::Code,
            NodeKind::Text { .. } => NodeType::Text,
            NodeKind::LineBreak => NodeType::LineBreak,
            NodeKind::Link { .. } => NodeType::Link,
            NodeKind::HorizontalRule => NodeType::HorizontalRule,
            NodeKind::Image { .. } => NodeType::Image,
            NodeKind::Equation { .. } => NodeType::Equation,
            NodeKind::Embed { .. } => NodeType::Embed,
            NodeKind::Table => NodeType::Table,
            NodeKind::TableRow => NodeType::TableRow,
            NodeKind::TableCell { .. } => NodeType::TableCell,
        }
    }

    pub fn text(text: impl Into<String>) -> NodeKind {
        NodeKind::Text {
            text: text.into(),
            format: TextFormat::empty(),
        }
    }

    pub fn formatted_text(text: impl Into<String>, format: TextFormat) -> NodeKind {
        NodeKind::Text {
            text: text.into(),
            format,
        }
    }

    pub fn table_cell() -> NodeKind {
        NodeKind::TableCell {
            header: HeaderState::None,
        }
    }
}

/// Owned copy of a subtree, detached from any arena.
///
/// Snapshots compare structurally, which makes them the natural unit for
/// round-trip assertions, and they serialize to JSON for inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub node: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn leaf(node: NodeKind) -> Self {
        NodeSnapshot {
            node,
            children: Vec::new(),
        }
    }

    pub fn with_children(node: NodeKind, children: Vec<NodeSnapshot>) -> Self {
        NodeSnapshot { node, children }
    }

    /// A paragraph holding a single plain text node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        NodeSnapshot::with_children(
            NodeKind::Paragraph,
            vec![NodeSnapshot::leaf(NodeKind::text(text))],
        )
    }
}
