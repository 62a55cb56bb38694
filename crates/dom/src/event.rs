//! Event listener bookkeeping and dispatch.
//!
//! Listeners carry a handler *value* rather than a closure. Dispatch walks the
//! propagation path (target first, then ancestors if the event bubbles) and
//! returns the handlers to run in order; the caller interprets them. This
//! keeps the tree free of borrows while handlers mutate it.
//!
//! Listeners are owned by their node: [`EventTargetMap::remove_nodes`] drops
//! every listener of a freed subtree.

use std::collections::HashMap;

use tracing::trace;

use crate::node::NodeId;
use crate::tree::Dom;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Which phase of propagation a handler was collected in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventPhase {
    AtTarget,
    Bubbling,
}

/// An event to be dispatched through the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Event type name (e.g. `"click"`, `"mouseover"`).
    pub type_: String,
    pub bubbles: bool,
}

impl Event {
    pub fn new(type_: &str, bubbles: bool) -> Self {
        Self {
            type_: type_.to_string(),
            bubbles,
        }
    }

    pub fn click() -> Self {
        Self::new("click", true)
    }

    pub fn mouseover() -> Self {
        Self::new("mouseover", true)
    }

    pub fn mouseout() -> Self {
        Self::new("mouseout", true)
    }
}

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

/// A single listener attached to a node.
#[derive(Clone, Debug, PartialEq)]
pub struct EventListener<H> {
    pub type_: String,
    pub handler: H,
}

impl<H> EventListener<H> {
    pub fn new(type_: &str, handler: H) -> Self {
        Self {
            type_: type_.to_string(),
            handler,
        }
    }
}

/// A handler selected by [`dispatch_event`], with the node it is attached to.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation<H> {
    pub current_target: NodeId,
    pub phase: EventPhase,
    pub handler: H,
}

// ---------------------------------------------------------------------------
// EventTargetMap
// ---------------------------------------------------------------------------

/// Listeners for every node that has at least one.
#[derive(Debug)]
pub struct EventTargetMap<H> {
    listeners: HashMap<NodeId, Vec<EventListener<H>>>,
}

impl<H> Default for EventTargetMap<H> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }
}

impl<H: Clone> EventTargetMap<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, node: NodeId, listener: EventListener<H>) {
        self.listeners.entry(node).or_default().push(listener);
    }

    /// Drop all listeners attached to any of `nodes`.
    pub fn remove_nodes(&mut self, nodes: &[NodeId]) {
        for node in nodes {
            self.listeners.remove(node);
        }
    }

    /// Total number of listeners across all nodes.
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn matching(&self, node: NodeId, type_: &str) -> impl Iterator<Item = &EventListener<H>> {
        self.listeners
            .get(&node)
            .into_iter()
            .flatten()
            .filter(move |l| l.type_ == type_)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Collect the handlers `event` reaches when dispatched at `target`.
///
/// Order: listeners on the target in registration order, then (if the event
/// bubbles) listeners on each ancestor from the parent up to the root.
pub fn dispatch_event<H: Clone>(
    dom: &Dom,
    targets: &EventTargetMap<H>,
    target: NodeId,
    event: &Event,
) -> Vec<Invocation<H>> {
    let mut out: Vec<Invocation<H>> = targets
        .matching(target, &event.type_)
        .map(|l| Invocation {
            current_target: target,
            phase: EventPhase::AtTarget,
            handler: l.handler.clone(),
        })
        .collect();

    if event.bubbles {
        for node in dom.ancestors(target) {
            out.extend(targets.matching(node, &event.type_).map(|l| Invocation {
                current_target: node,
                phase: EventPhase::Bubbling,
                handler: l.handler.clone(),
            }));
        }
    }
    trace!(?target, type_ = %event.type_, handlers = out.len(), "dispatch_event");
    out
}

// ===========================================================================
// Tests
// ===========================================================================
