//! Arena-backed document tree.
//!
//! Nodes live in a flat arena and refer to each other through [`NodeId`]s.
//! Structural edits (append, insert, replace, remove) only rewrite parent and
//! child links, so an id obtained before an edit can still be inspected after
//! it, even if the node was detached. This is what lets the table rule walk
//! backwards over siblings while removing them.

use super::nodes::{NodeId, NodeKind, NodeSnapshot, NodeType, TextFormat};
use serde::Serialize;

#[derive(Debug, Clone)]
struct Slot {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Where the caret ends up after a rule has mutated the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Caret inside a text node, at a byte offset.
    Caret { node: NodeId, offset: usize },
    /// Caret right after a node, in its parent.
    After(NodeId),
    Start(NodeId),
    End(NodeId),
}

/// A document tree with a single root node.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    root: NodeId,
    selection: Option<Selection>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Document {
            slots: vec![Slot {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
            selection: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocate a detached node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create(NodeKind::text(text))
    }

    /// Allocate a detached paragraph holding one text node.
    pub fn create_paragraph(&mut self, text: impl Into<String>) -> NodeId {
        let paragraph = self.create(NodeKind::Paragraph);
        let text = self.create_text(text);
        self.append(paragraph, text);
        paragraph
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.slots[id.0].kind
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.slots[id.0].kind
    }

    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.kind(id).node_type()
    }

    pub fn is(&self, id: NodeId, node_type: NodeType) -> bool {
        self.node_type(id) == node_type
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.0].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index
            .checked_sub(1)
            .map(|previous| self.children(parent)[previous])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Siblings following `id`, in document order.
    pub fn next_siblings(&self, id: NodeId) -> Vec<NodeId> {
        match (self.parent(id), self.index_in_parent(id)) {
            (Some(parent), Some(index)) => self.children(parent)[index + 1..].to_vec(),
            _ => Vec::new(),
        }
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.slots[id.0].parent.take() {
            self.slots[parent.0].children.retain(|child| *child != id);
        }
    }

    fn insert_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        debug_assert!(child != self.root, "the root cannot be re-parented");
        self.detach(child);
        let children = &mut self.slots[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.slots[child.0].parent = Some(parent);
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        // Detach first: re-appending an existing child shifts the length.
        self.detach(child);
        let len = self.children(parent).len();
        self.insert_at(parent, len, child);
    }

    pub fn append_all(&mut self, parent: NodeId, children: &[NodeId]) {
        for child in children {
            self.append(parent, *child);
        }
    }

    /// Insert `node` as the previous sibling of `target`.
    pub fn insert_before(&mut self, target: NodeId, node: NodeId) {
        self.detach(node);
        if let (Some(parent), Some(index)) = (self.parent(target), self.index_in_parent(target)) {
            self.insert_at(parent, index, node);
        }
    }

    /// Insert `node` as the next sibling of `target`.
    pub fn insert_after(&mut self, target: NodeId, node: NodeId) {
        self.detach(node);
        if let (Some(parent), Some(index)) = (self.parent(target), self.index_in_parent(target)) {
            self.insert_at(parent, index + 1, node);
        }
    }

    /// Put `node` where `target` is and detach `target`.
    pub fn replace(&mut self, target: NodeId, node: NodeId) {
        if target == node {
            return;
        }
        self.detach(node);
        if let (Some(parent), Some(index)) = (self.parent(target), self.index_in_parent(target)) {
            self.detach(target);
            self.insert_at(parent, index, node);
        }
    }

    /// Detach a node from its parent. The id remains readable.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
        if let Some(Selection::Caret { node, .. }) = self.selection {
            if node == id {
                self.selection = None;
            }
        }
    }

    /// Text of a text node, `None` for every other kind.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn text_format(&self, id: NodeId) -> Option<TextFormat> {
        match self.kind(id) {
            NodeKind::Text { format, .. } => Some(*format),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) {
        if let NodeKind::Text { text, .. } = self.kind_mut(id) {
            *text = value.into();
        }
    }

    pub fn set_text_format(&mut self, id: NodeId, value: TextFormat) {
        if let NodeKind::Text { format, .. } = self.kind_mut(id) {
            *format = value;
        }
    }

    /// Insert `value` into a text node at a byte offset.
    pub fn insert_text(&mut self, id: NodeId, offset: usize, value: &str) {
        if let NodeKind::Text { text, .. } = self.kind_mut(id) {
            let offset = offset.min(text.len());
            text.insert_str(offset, value);
        }
    }

    /// Split a text node at the given byte offsets.
    ///
    /// The first piece keeps the original id; the others are new siblings that
    /// inherit the format. Offsets at either end of the text are ignored, so no
    /// empty pieces are produced. Returns every piece in document order.
    pub fn split_text(&mut self, id: NodeId, offsets: &[usize]) -> Vec<NodeId> {
        let (text, format) = match self.kind(id) {
            NodeKind::Text { text, format } => (text.clone(), *format),
            _ => return vec![id],
        };
        let mut cuts: Vec<usize> = offsets
            .iter()
            .copied()
            .filter(|offset| *offset > 0 && *offset < text.len() && text.is_char_boundary(*offset))
            .collect();
        cuts.sort_unstable();
        cuts.dedup();
        if cuts.is_empty() {
            return vec![id];
        }

        let mut bounds = vec![0];
        bounds.extend(cuts);
        bounds.push(text.len());

        let mut pieces = vec![id];
        self.set_text(id, &text[bounds[0]..bounds[1]]);
        let mut previous = id;
        for window in bounds[1..].windows(2) {
            let piece = self.create(NodeKind::formatted_text(&text[window[0]..window[1]], format));
            self.insert_after(previous, piece);
            pieces.push(piece);
            previous = piece;
        }
        pieces
    }

    /// Merge adjacent text children that share a format and drop empty ones.
    pub fn normalize_text(&mut self, parent: NodeId) {
        let children = self.children(parent).to_vec();
        let mut previous: Option<NodeId> = None;
        for child in children {
            let Some(format) = self.text_format(child) else {
                previous = None;
                continue;
            };
            let text = self.text(child).unwrap_or_default().to_string();
            if text.is_empty() {
                self.remove(child);
                continue;
            }
            match previous {
                Some(prev) if self.text_format(prev) == Some(format) => {
                    let merged = format!("{}{}", self.text(prev).unwrap_or_default(), text);
                    self.set_text(prev, merged);
                    self.remove(child);
                }
                _ => previous = Some(child),
            }
        }
    }

    /// Plain text of a subtree. Block children are separated by a newline.
    pub fn text_content(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Text { text, .. } => text.clone(),
            NodeKind::LineBreak => "\n".to_string(),
            NodeKind::Equation { equation, .. } => equation.clone(),
            NodeKind::Image { alt, .. } => alt.clone(),
            NodeKind::HorizontalRule | NodeKind::Embed { .. } => String::new(),
            NodeKind::Root
            | NodeKind::TableCell { .. }
            | NodeKind::Quote
            | NodeKind::List { .. }
            | NodeKind::Table
            | NodeKind::TableRow => self
                .children(id)
                .iter()
                .map(|child| self.text_content(*child))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => self
                .children(id)
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }

    /// Every node below `id`, in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    pub fn select_next(&mut self, id: NodeId) {
        self.selection = Some(match self.next_sibling(id) {
            Some(next) => Selection::Start(next),
            None => Selection::After(id),
        });
    }

    pub fn select_end(&mut self, id: NodeId) {
        self.selection = Some(Selection::End(id));
    }

    pub fn select_start(&mut self, id: NodeId) {
        self.selection = Some(Selection::Start(id));
    }

    /// Owned copy of the subtree rooted at `id`.
    pub fn snapshot(&self, id: NodeId) -> NodeSnapshot {
        NodeSnapshot::with_children(
            self.kind(id).clone(),
            self.children(id)
                .iter()
                .map(|child| self.snapshot(*child))
                .collect(),
        )
    }

    /// Snapshots of the root's children.
    pub fn snapshot_children(&self, id: NodeId) -> Vec<NodeSnapshot> {
        self.children(id)
            .iter()
            .map(|child| self.snapshot(*child))
            .collect()
    }

    /// Materialize a snapshot as a new detached subtree.
    pub fn build(&mut self, snapshot: &NodeSnapshot) -> NodeId {
        let id = self.create(snapshot.node.clone());
        for child in &snapshot.children {
            let child_id = self.build(child);
            self.append(id, child_id);
        }
        id
    }

    /// Build a document whose root holds the given blocks.
    pub fn from_blocks(blocks: &[NodeSnapshot]) -> Self {
        let mut doc = Document::new();
        let root = doc.root();
        for block in blocks {
            let id = doc.build(block);
            doc.append(root, id);
        }
        doc
    }
}
