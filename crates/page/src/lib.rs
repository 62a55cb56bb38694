//! # Page Crate
//!
//! The live display environment the demo content is built in. A [`Page`]
//! owns the node tree, the listeners attached to its nodes, an event loop on
//! a virtual clock and the console. It fires a one-shot ready signal after
//! [`Page::load`] and implements [`DisplayHost`] for the generator.

#![forbid(unsafe_code)]

use demo_content::{Action, DemoError, DisplayHost, perform};
use dom::{Dom, Event, EventListener, EventTargetMap, NodeId, dispatch_event};
use scheduler::{EventLoop, TimerId};
use thiserror::Error;
use tracing::{debug, info, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum PageError {
    #[error("page has already been loaded")]
    AlreadyLoaded,

    #[error("ready signal has already fired")]
    AlreadyReady,

    #[error("page is not interactive (state {0:?})")]
    NotInteractive(PageState),

    #[error(transparent)]
    Demo(#[from] DemoError),
}

pub type PageResult<T> = Result<T, PageError>;

// ─────────────────────────────────────────────────────────────────────────────
// PageState
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageState {
    /// Nothing loaded yet.
    Empty,
    /// Document skeleton built, ready signal pending.
    Loading,
    /// Ready signal fired; events and timers are live.
    Interactive,
    /// Tree torn down.
    Closed,
}

impl PageState {
    /// Returns `true` while the page has a display tree.
    pub fn has_tree(&self) -> bool {
        matches!(self, PageState::Loading | PageState::Interactive)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page
// ─────────────────────────────────────────────────────────────────────────────

/// Hook run once when the page becomes interactive.
pub type ReadyHook = Box<dyn FnOnce(&mut Page) -> Result<(), DemoError>>;

enum Task {
    Ready,
    Run(Action),
}

pub struct Page {
    state: PageState,
    dom: Dom,
    document: Option<NodeId>,
    body: Option<NodeId>,
    listeners: EventTargetMap<Action>,
    event_loop: EventLoop<Task>,
    ready_hooks: Vec<ReadyHook>,
    console: Vec<String>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            state: PageState::Empty,
            dom: Dom::new(),
            document: None,
            body: None,
            listeners: EventTargetMap::new(),
            event_loop: EventLoop::new(),
            ready_hooks: Vec::new(),
            console: Vec::new(),
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// Lines written to the console, oldest first.
    pub fn console(&self) -> &[String] {
        &self.console
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.event_loop.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.event_loop.timer_count()
    }

    /// Register a hook for the ready signal. Hooks run in registration
    /// order, once.
    pub fn on_ready<F>(&mut self, hook: F) -> PageResult<()>
    where
        F: FnOnce(&mut Page) -> Result<(), DemoError> + 'static,
    {
        if matches!(self.state, PageState::Interactive | PageState::Closed) {
            return Err(PageError::AlreadyReady);
        }
        self.ready_hooks.push(Box::new(hook));
        Ok(())
    }

    /// Build the `html > head + body` skeleton and queue the ready signal.
    /// The signal fires on the next [`advance`](Page::advance).
    pub fn load(&mut self) -> PageResult<()> {
        if self.state != PageState::Empty {
            return Err(PageError::AlreadyLoaded);
        }
        let document = self.dom.create_document();
        let html = self.dom.create_element("html");
        let head = self.dom.create_element("head");
        let body = self.dom.create_element("body");
        self.dom.append_child(document, html).map_err(DemoError::from)?;
        self.dom.append_child(html, head).map_err(DemoError::from)?;
        self.dom.append_child(html, body).map_err(DemoError::from)?;
        self.document = Some(document);
        self.body = Some(body);
        self.state = PageState::Loading;
        self.event_loop.post_task(Task::Ready);
        info!("page loading");
        Ok(())
    }

    /// Run everything due within the next `ms` virtual milliseconds and
    /// leave the clock at `now + ms`. Returns the number of tasks run.
    ///
    /// A failing ready hook aborts the advance. A failing timer action is
    /// logged and skipped, so one stale node does not stop the others.
    pub fn advance(&mut self, ms: u64) -> PageResult<usize> {
        let until = self.event_loop.now().saturating_add(ms);
        let mut ran = 0;
        while let Some(task) = self.event_loop.next_due(until) {
            ran += 1;
            match task {
                Task::Ready => self.fire_ready()?,
                Task::Run(action) => {
                    if let Err(err) = perform(self, &action, None) {
                        warn!(%err, ?action, "timer action failed");
                    }
                }
            }
        }
        self.event_loop.advance_clock(until);
        Ok(ran)
    }

    fn fire_ready(&mut self) -> PageResult<()> {
        if self.state != PageState::Loading {
            debug!(state = ?self.state, "ready signal dropped");
            return Ok(());
        }
        self.state = PageState::Interactive;
        info!(hooks = self.ready_hooks.len(), "page ready");
        for hook in std::mem::take(&mut self.ready_hooks) {
            hook(self)?;
        }
        Ok(())
    }

    // =======================================================================
    // Input
    // =======================================================================

    /// Dispatch `event` at `target` and run every handler it reaches.
    /// Returns the number of handlers run.
    pub fn dispatch(&mut self, target: NodeId, event: &Event) -> PageResult<usize> {
        if self.state != PageState::Interactive {
            return Err(PageError::NotInteractive(self.state));
        }
        if !self.dom.contains(target) {
            return Err(DemoError::UnknownNode(target).into());
        }
        let invocations = dispatch_event(&self.dom, &self.listeners, target, event);
        for inv in &invocations {
            perform(self, &inv.handler, Some(inv.current_target))?;
        }
        Ok(invocations.len())
    }

    /// Pointer moves onto `target`.
    pub fn hover(&mut self, target: NodeId) -> PageResult<usize> {
        self.dispatch(target, &Event::mouseover())
    }

    /// Pointer leaves `target`.
    pub fn unhover(&mut self, target: NodeId) -> PageResult<usize> {
        self.dispatch(target, &Event::mouseout())
    }

    pub fn click(&mut self, target: NodeId) -> PageResult<usize> {
        self.dispatch(target, &Event::click())
    }

    // =======================================================================
    // Teardown / output
    // =======================================================================

    /// Tear down the tree. Listeners go with their nodes; timers still
    /// pending will find their nodes gone.
    pub fn close(&mut self) {
        if let Some(document) = self.document.take() {
            let freed = self.dom.remove_subtree(document);
            self.listeners.remove_nodes(&freed);
            debug!(nodes = freed.len(), "page closed");
        }
        self.body = None;
        self.ready_hooks.clear();
        self.state = PageState::Closed;
    }

    /// Serialize the whole document, or an empty string once closed.
    pub fn to_html(&self) -> String {
        self.document
            .map(|doc| self.dom.to_html(doc))
            .unwrap_or_default()
    }

    fn known(&self, node: NodeId) -> Result<NodeId, DemoError> {
        if self.dom.contains(node) {
            Ok(node)
        } else {
            Err(DemoError::UnknownNode(node))
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DisplayHost
// ─────────────────────────────────────────────────────────────────────────────

impl DisplayHost for Page {
    fn root(&self) -> Result<NodeId, DemoError> {
        match self.body {
            Some(body) if self.state.has_tree() => Ok(body),
            _ => Err(DemoError::HostUnavailable),
        }
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DemoError> {
        self.root()?;
        Ok(self.dom.create_element(tag))
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DemoError> {
        let node = self.known(node)?;
        Ok(self.dom.add_class(node, class)?)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<(), DemoError> {
        let node = self.known(node)?;
        Ok(self.dom.set_style(node, property, value)?)
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), DemoError> {
        let node = self.known(node)?;
        let old = self.dom.descendants(node);
        self.dom.set_text_content(node, text)?;
        self.listeners.remove_nodes(&old);
        Ok(())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DemoError> {
        let parent = self.known(parent)?;
        let child = self.known(child)?;
        Ok(self.dom.append_child(parent, child)?)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DemoError> {
        let parent = self.known(parent)?;
        let child = self.known(child)?;
        Ok(self.dom.insert_before(parent, child, reference)?)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.dom.first_child(node)
    }

    fn query_class(&self, marker: &str) -> Vec<NodeId> {
        match self.document {
            Some(doc) => self.dom.get_elements_by_class(doc, marker),
            None => Vec::new(),
        }
    }

    fn add_listener(&mut self, node: NodeId, event: &str, action: Action) -> Result<(), DemoError> {
        let node = self.known(node)?;
        self.listeners.add_listener(node, EventListener::new(event, action));
        Ok(())
    }

    fn set_timeout(&mut self, delay_ms: u64, action: Action) -> TimerId {
        self.event_loop.set_timeout(Task::Run(action), delay_ms)
    }

    fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.event_loop.clear_timer(id).is_some()
    }

    fn log(&mut self, line: &str) {
        info!(target: "console", "{line}");
        self.console.push(line.to_string());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
