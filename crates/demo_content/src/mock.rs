//! Recording host used by the unit tests.

use dom::{Dom, NodeId};
use scheduler::TimerId;

use crate::error::{DemoError, Result};
use crate::host::{Action, DisplayHost};

pub(crate) struct PendingTimer {
    pub id: TimerId,
    pub delay_ms: u64,
    pub action: Action,
}

#[derive(Default)]
pub(crate) struct MockHost {
    pub dom: Dom,
    pub root: Option<NodeId>,
    pub listeners: Vec<(NodeId, String, Action)>,
    pub timers: Vec<PendingTimer>,
    pub log: Vec<String>,
    next_timer: u64,
}

impl MockHost {
    /// A host with a single `body` root.
    pub fn ready() -> Self {
        let mut host = Self::default();
        host.root = Some(host.dom.create_element("body"));
        host
    }

    /// A host without a display tree.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn listeners_on(&self, node: NodeId) -> Vec<String> {
        self.listeners
            .iter()
            .filter(|(n, ..)| *n == node)
            .map(|(_, event, _)| event.clone())
            .collect()
    }

    pub fn listener(&self, node: NodeId, event: &str) -> Option<Action> {
        self.listeners
            .iter()
            .find(|(n, e, _)| *n == node && e == event)
            .map(|(.., action)| action.clone())
    }

    fn known(&self, node: NodeId) -> Result<NodeId> {
        if self.dom.contains(node) {
            Ok(node)
        } else {
            Err(DemoError::UnknownNode(node))
        }
    }
}

impl DisplayHost for MockHost {
    fn root(&self) -> Result<NodeId> {
        self.root.ok_or(DemoError::HostUnavailable)
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        self.root()?;
        Ok(self.dom.create_element(tag))
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        Ok(self.dom.add_class(node, class)?)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()> {
        let node = self.known(node)?;
        Ok(self.dom.set_style(node, property, value)?)
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        Ok(self.dom.set_text_content(node, text)?)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        Ok(self.dom.append_child(parent, child)?)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        Ok(self.dom.insert_before(parent, child, reference)?)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.dom.first_child(node)
    }

    fn query_class(&self, marker: &str) -> Vec<NodeId> {
        match self.root {
            Some(root) => self.dom.get_elements_by_class(root, marker),
            None => Vec::new(),
        }
    }

    fn add_listener(&mut self, node: NodeId, event: &str, action: Action) -> Result<()> {
        self.known(node)?;
        self.listeners.push((node, event.to_string(), action));
        Ok(())
    }

    fn set_timeout(&mut self, delay_ms: u64, action: Action) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.timers.push(PendingTimer {
            id,
            delay_ms,
            action,
        });
        id
    }

    fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    fn log(&mut self, line: &str) {
        self.log.push(line.to_string());
    }
}
