//! Builders for the page's display content.
//!
//! Each builder checks the host is live, constructs a detached subtree and
//! returns its top node; attaching it is the caller's job.

use std::fmt;

use dom::NodeId;
use rand::Rng;
use tracing::debug;

use crate::config::DemoConfig;
use crate::error::Result;
use crate::host::{Action, DisplayHost};
use crate::text::lorem_ipsum_words;

pub const DYNAMIC_CONTAINER_CLASS: &str = "dynamic-container";
pub const DYNAMIC_ELEMENT_CLASS: &str = "dynamic-element";
pub const DATA_TABLE_CLASS: &str = "data-table";
pub const TEXT_CONTAINER_CLASS: &str = "text-container";

pub const TABLE_HEADERS: [&str; 4] = ["ID", "Name", "Value", "Status"];
pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_INACTIVE: &str = "Inactive";
pub const ANIMATE_BUTTON_LABEL: &str = "Animate Elements";

/// Fixed presentation of every colored box.
const ELEMENT_STYLE: [(&str, &str); 5] = [
    ("width", "100px"),
    ("height", "100px"),
    ("margin", "10px"),
    ("display", "inline-block"),
    ("transition", "all 0.3s ease"),
];

const HOVER_STYLE: [(&str, &str); 2] = [
    ("transform", "scale(1.1)"),
    ("box-shadow", "0 0 10px rgba(0,0,0,0.5)"),
];

const REST_STYLE: [(&str, &str); 2] = [("transform", "scale(1)"), ("box-shadow", "none")];

// ─────────────────────────────────────────────────────────────────────────────
// Rgb
// ─────────────────────────────────────────────────────────────────────────────

/// An opaque color, rendered as CSS `rgb(r,g,b)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Each channel drawn independently from `[0, 255)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(0..255),
            g: rng.gen_range(0..255),
            b: rng.gen_range(0..255),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builders
// ─────────────────────────────────────────────────────────────────────────────

/// A container of `element_count` randomly colored boxes that grow and cast
/// a shadow while hovered.
pub fn build_dynamic_elements<H, R>(host: &mut H, rng: &mut R, config: &DemoConfig) -> Result<NodeId>
where
    H: DisplayHost + ?Sized,
    R: Rng + ?Sized,
{
    host.root()?;
    let container = host.create_element("div")?;
    host.add_class(container, DYNAMIC_CONTAINER_CLASS)?;

    for _ in 0..config.element_count {
        let element = host.create_element("div")?;
        host.add_class(element, DYNAMIC_ELEMENT_CLASS)?;
        host.set_style(element, "background-color", &Rgb::random(rng).to_string())?;
        for (property, value) in ELEMENT_STYLE {
            host.set_style(element, property, value)?;
        }
        host.add_listener(element, "mouseover", Action::set_styles(HOVER_STYLE))?;
        host.add_listener(element, "mouseout", Action::set_styles(REST_STYLE))?;
        host.append_child(container, element)?;
    }
    debug!(?container, count = config.element_count, "built dynamic elements");
    Ok(container)
}

/// A table with a four-column header and `table_rows` rows of
/// id / name / random value / random status.
pub fn build_data_table<H, R>(host: &mut H, rng: &mut R, config: &DemoConfig) -> Result<NodeId>
where
    H: DisplayHost + ?Sized,
    R: Rng + ?Sized,
{
    host.root()?;
    let table = host.create_element("table")?;
    host.add_class(table, DATA_TABLE_CLASS)?;

    let thead = host.create_element("thead")?;
    let header_row = host.create_element("tr")?;
    for header in TABLE_HEADERS {
        append_cell(host, header_row, "th", header)?;
    }
    host.append_child(thead, header_row)?;
    host.append_child(table, thead)?;

    let tbody = host.create_element("tbody")?;
    for id in 1..=config.table_rows {
        let row = host.create_element("tr")?;
        let value = rng.gen_range(0..1000u32);
        let status = if rng.gen_bool(0.5) {
            STATUS_ACTIVE
        } else {
            STATUS_INACTIVE
        };
        append_cell(host, row, "td", &id.to_string())?;
        append_cell(host, row, "td", &format!("Item {id}"))?;
        append_cell(host, row, "td", &value.to_string())?;
        append_cell(host, row, "td", status)?;
        host.append_child(tbody, row)?;
    }
    host.append_child(table, tbody)?;
    debug!(?table, rows = config.table_rows, "built data table");
    Ok(table)
}

fn append_cell<H: DisplayHost + ?Sized>(
    host: &mut H,
    row: NodeId,
    tag: &str,
    text: &str,
) -> Result<()> {
    let cell = host.create_element(tag)?;
    host.set_text(cell, text)?;
    host.append_child(row, cell)
}

/// A block of pseudo-Latin filler text.
pub fn build_text_block<H, R>(host: &mut H, rng: &mut R, config: &DemoConfig) -> Result<NodeId>
where
    H: DisplayHost + ?Sized,
    R: Rng + ?Sized,
{
    host.root()?;
    let block = host.create_element("div")?;
    host.add_class(block, TEXT_CONTAINER_CLASS)?;
    host.set_text(block, &lorem_ipsum_words(rng, config.word_count))?;
    Ok(block)
}

/// A button that starts the staggered spin of the colored boxes on click.
pub fn build_animate_button<H>(host: &mut H, config: &DemoConfig) -> Result<NodeId>
where
    H: DisplayHost + ?Sized,
{
    host.root()?;
    let button = host.create_element("button")?;
    host.set_text(button, ANIMATE_BUTTON_LABEL)?;
    host.add_listener(
        button,
        "click",
        Action::AnimateElements {
            marker: DYNAMIC_ELEMENT_CLASS.to_string(),
            stagger_ms: config.stagger_ms,
            spin_ms: config.spin_ms,
        },
    )?;
    Ok(button)
}
