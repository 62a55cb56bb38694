//! # Demo Content Crate
//!
//! Generator for the demo page: toy computations (naive Fibonacci, bubble
//! sort, random sequences, pseudo-Latin text) and builders that assemble
//! colored boxes, a data table, a text block and an animate control inside
//! a [`DisplayHost`].
//!
//! Computations are pure functions. Everything that touches display state
//! takes the host as an explicit parameter.

#![forbid(unsafe_code)]

pub mod animation;
pub mod builders;
pub mod compute;
pub mod config;
pub mod entry;
pub mod error;
pub mod host;
pub mod text;

#[cfg(test)]
pub(crate) mod mock;

pub use animation::{animate_elements, perform};
pub use builders::{
    Rgb, build_animate_button, build_data_table, build_dynamic_elements, build_text_block,
};
pub use compute::{MAX_FIBONACCI_INDEX, bubble_sort, fibonacci, random_sequence};
pub use config::{DemoConfig, MAX_FIBONACCI_COUNT};
pub use entry::{ReadyReport, on_ready};
pub use error::{DemoError, Result};
pub use host::{Action, DisplayHost};
pub use text::{WORDS, lorem_ipsum, lorem_ipsum_words};
