//! Display node model.
//!
//! Every node lives in a `generational_arena::Arena<Node>` and is referenced
//! by a [`NodeId`]. Parent/child/sibling links are stored on the node itself.

/// A handle into the arena that identifies a display node.
pub type NodeId = generational_arena::Index;

// ---------------------------------------------------------------------------
// Inline style
// ---------------------------------------------------------------------------

/// One inline style declaration, e.g. `width: 100px`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleDecl {
    pub property: String,
    pub value: String,
}

/// Ordered set of inline style declarations.
///
/// Setting a property that already exists replaces its value in place, so
/// the serialized order is the order of first assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    decls: Vec<StyleDecl>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `property` to `value`, replacing any previous value.
    pub fn set(&mut self, property: &str, value: &str) {
        match self.decls.iter_mut().find(|d| d.property == property) {
            Some(decl) => decl.value = value.to_string(),
            None => self.decls.push(StyleDecl {
                property: property.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Look up the current value of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Render as the value of a `style` attribute: `a: b; c: d`.
    pub fn to_css_text(&self) -> String {
        self.decls
            .iter()
            .map(|d| format!("{}: {}", d.property, d.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ---------------------------------------------------------------------------
// Element data
// ---------------------------------------------------------------------------

/// Data specific to element nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementData {
    pub tag_name: String,
    /// Class markers in insertion order, without duplicates.
    pub classes: Vec<String>,
    pub style: InlineStyle,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            classes: Vec::new(),
            style: InlineStyle::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

// ---------------------------------------------------------------------------
// Node data
// ---------------------------------------------------------------------------

/// The payload that distinguishes different kinds of nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text { data: String },
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single node in the display tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub data: NodeData,

    // -- tree links ----------------------------------------------------------
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    /// Create a detached node.
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }
}
