//! The boundary between the generator and whatever owns the display tree.

use dom::NodeId;
use scheduler::TimerId;

use crate::error::Result;

/// Work a host performs later: when an event reaches a listener, or when a
/// timer fires. Hosts hand actions back to [`perform`](crate::perform).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Set inline style properties on the node the listener is attached to.
    SetStyles(Vec<(String, String)>),
    /// Start the staggered spin of every node carrying `marker`.
    AnimateElements {
        marker: String,
        stagger_ms: u64,
        spin_ms: u64,
    },
    /// Rotate `node` a full turn and schedule its reset.
    Rotate { node: NodeId, reset_after_ms: u64 },
    /// Return `node` to zero rotation.
    ResetRotation { node: NodeId },
}

impl Action {
    pub fn set_styles<'a>(styles: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::SetStyles(
            styles
                .into_iter()
                .map(|(p, v)| (p.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// A display environment the generator can build content in.
///
/// Node handles are only meaningful to the host that issued them. Operations
/// on a node the host no longer knows fail with
/// [`DemoError::UnknownNode`](crate::DemoError::UnknownNode) or a wrapped
/// tree error.
pub trait DisplayHost {
    /// The node that visible content is attached to.
    ///
    /// Fails with [`DemoError::HostUnavailable`](crate::DemoError::HostUnavailable)
    /// while the host has no live tree.
    fn root(&self) -> Result<NodeId>;

    fn create_element(&mut self, tag: &str) -> Result<NodeId>;

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<()>;

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()>;

    /// Replace the children of `node` with a single text node.
    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()>;

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Insert `child` before `reference`; `None` appends.
    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()>;

    fn first_child(&self, node: NodeId) -> Option<NodeId>;

    /// Live nodes attached under the root that carry `marker`, in document
    /// order.
    fn query_class(&self, marker: &str) -> Vec<NodeId>;

    /// Register `action` to run when `event` reaches `node`. The listener
    /// lives as long as the node.
    fn add_listener(&mut self, node: NodeId, event: &str, action: Action) -> Result<()>;

    /// Run `action` once after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: u64, action: Action) -> TimerId;

    /// Cancel a pending timer. Returns `false` if it already fired.
    fn clear_timeout(&mut self, id: TimerId) -> bool;

    /// Console sink.
    fn log(&mut self, line: &str);
}
