//! Display tree operations.
//!
//! [`Dom`] owns the node arena and keeps the intrusive parent/child/sibling
//! links consistent across every mutation.

use generational_arena::Arena;
use thiserror::Error;
use tracing::{debug, trace};

use crate::node::{ElementData, Node, NodeData, NodeId};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),

    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("node {child:?} cannot be inserted under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("node {reference:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, reference: NodeId },
}

pub type DomResult<T> = Result<T, DomError>;

// ---------------------------------------------------------------------------
// Dom
// ---------------------------------------------------------------------------

/// The complete display tree.
pub struct Dom {
    pub nodes: Arena<Node>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
        }
    }

    // =======================================================================
    // Node creation
    // =======================================================================

    pub fn create_document(&mut self) -> NodeId {
        self.nodes.insert(Node::new(NodeData::Document))
    }

    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let id = self
            .nodes
            .insert(Node::new(NodeData::Element(ElementData::new(tag_name))));
        trace!(?id, tag_name, "created element");
        id
    }

    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.nodes.insert(Node::new(NodeData::Text {
            data: data.to_string(),
        }))
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(node)
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes.get(id).ok_or(DomError::UnknownNode(id))
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        let node = self.nodes.get_mut(id).ok_or(DomError::UnknownNode(id))?;
        node.as_element_mut().ok_or(DomError::NotAnElement(id))
    }

    pub fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.node(id)?.as_element().ok_or(DomError::NotAnElement(id))
    }

    // =======================================================================
    // Attributes
    // =======================================================================

    /// Add a class marker to an element. Adding an existing class is a no-op.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> DomResult<()> {
        let elem = self.element_mut(node)?;
        if !elem.has_class(class) {
            elem.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).map(|e| e.has_class(class)).unwrap_or(false)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> DomResult<()> {
        self.element_mut(node)?.style.set(property, value);
        Ok(())
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node).ok()?.style.get(property)
    }

    /// Replace all children of `node` with a single text node.
    ///
    /// An empty string leaves the node without children.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        self.node(node)?;
        for child in self.children(node) {
            self.remove_subtree(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(node, text_node)?;
        }
        Ok(())
    }

    /// Concatenated text of every text node under `node`, in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(Node {
            data: NodeData::Text { data },
            ..
        }) = self.nodes.get(node)
        {
            out.push_str(data);
        }
        for desc in self.descendants(node) {
            if let Some(Node {
                data: NodeData::Text { data },
                ..
            }) = self.nodes.get(desc)
            {
                out.push_str(data);
            }
        }
        out
    }

    // =======================================================================
    // Tree mutation
    // =======================================================================

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_insertion(parent, child)?;
        self.detach(child);

        let old_last = self.node(parent)?.last_child;
        if let Some(old_last_id) = old_last {
            if let Some(old_last_node) = self.nodes.get_mut(old_last_id) {
                old_last_node.next_sibling = Some(child);
            }
        }

        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = old_last;
            child_node.next_sibling = None;
        }

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = Some(child);
            }
            parent_node.last_child = Some(child);
        }
        debug!(?parent, ?child, "append_child");
        Ok(())
    }

    /// Insert `child` immediately before `reference` in `parent`'s child
    /// list. A `None` reference appends.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        let Some(reference) = reference else {
            return self.append_child(parent, child);
        };

        self.check_insertion(parent, child)?;
        if self.node(reference)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, reference });
        }
        if reference == child {
            return Ok(());
        }
        self.detach(child);

        let prev_of_ref = self.node(reference)?.prev_sibling;

        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = prev_of_ref;
            child_node.next_sibling = Some(reference);
        }
        if let Some(ref_node) = self.nodes.get_mut(reference) {
            ref_node.prev_sibling = Some(child);
        }
        match prev_of_ref {
            Some(prev_id) => {
                if let Some(prev_node) = self.nodes.get_mut(prev_id) {
                    prev_node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.first_child = Some(child);
                }
            }
        }
        debug!(?parent, ?child, ?reference, "insert_before");
        Ok(())
    }

    /// Detach `node` and free it together with all of its descendants.
    /// Returns the ids that were freed, `node` first.
    pub fn remove_subtree(&mut self, node: NodeId) -> Vec<NodeId> {
        if !self.contains(node) {
            return Vec::new();
        }
        self.detach(node);
        let mut removed = vec![node];
        removed.extend(self.descendants(node));
        for &id in &removed {
            self.nodes.remove(id);
        }
        removed
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        self.node(child)?;
        if parent_node.is_text() || parent == child || self.ancestors(parent).contains(&child) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Unlink a node from its parent and siblings without freeing it.
    fn detach(&mut self, node_id: NodeId) {
        let (parent_id, prev, next) = match self.nodes.get(node_id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.nodes.get_mut(prev_id) {
                prev_node.next_sibling = next;
            }
        }
        if let Some(next_id) = next {
            if let Some(next_node) = self.nodes.get_mut(next_id) {
                next_node.prev_sibling = prev;
            }
        }
        if let Some(pid) = parent_id {
            if let Some(parent_node) = self.nodes.get_mut(pid) {
                if parent_node.first_child == Some(node_id) {
                    parent_node.first_child = next;
                }
                if parent_node.last_child == Some(node_id) {
                    parent_node.last_child = prev;
                }
            }
        }
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    // =======================================================================
    // Traversal
    // =======================================================================

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.first_child)
    }

    /// Immediate children of `parent` in document order.
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.first_child(parent);
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.nodes.get(id).and_then(|n| n.next_sibling);
        }
        out
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.parent(node);
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.parent(id);
        }
        out
    }

    /// All descendants of `node` in pre-order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }

    // =======================================================================
    // Queries
    // =======================================================================

    /// Elements under `root` (inclusive) carrying `class`, in document order.
    pub fn get_elements_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.filter_elements(root, |e| e.has_class(class))
    }

    /// Elements under `root` (inclusive) with tag name `tag`, in document order.
    pub fn get_elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.filter_elements(root, |e| e.tag_name == tag)
    }

    fn filter_elements(&self, root: NodeId, pred: impl Fn(&ElementData) -> bool) -> Vec<NodeId> {
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|&id| {
                self.nodes
                    .get(id)
                    .and_then(Node::as_element)
                    .is_some_and(|e| pred(e))
            })
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
