//! DOM crate — display tree for the demo page
//!
//! Arena-based node tree with inline styles, class markers and event
//! listener bookkeeping. Nodes are addressed by generational indices from
//! `generational-arena` instead of Rc/RefCell.

pub mod event;
pub mod node;
pub mod serialize;
pub mod tree;

pub use event::*;
pub use node::*;
pub use tree::Dom;
