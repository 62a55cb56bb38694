//! Generator configuration.
//!
//! The defaults reproduce the stock demo page. A TOML file may override any
//! subset of the fields.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{DemoError, Result};

/// Upper bound on `fibonacci_count`. The sequence is computed by naive
/// recursion, so each further index costs about 1.6 times the previous one;
/// F(39) is already a few hundred million calls.
pub const MAX_FIBONACCI_COUNT: u32 = 40;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// How many Fibonacci numbers to log, starting at F(0).
    pub fibonacci_count: u32,
    /// Length of the random sequence that is sorted and logged.
    pub array_size: usize,
    /// Number of colored boxes in the dynamic container.
    pub element_count: usize,
    /// Number of data rows in the table.
    pub table_rows: usize,
    /// Number of words in the text block.
    pub word_count: usize,
    /// Delay between the start of consecutive element spins.
    pub stagger_ms: u64,
    /// How long an element stays rotated before it is reset.
    pub spin_ms: u64,
    /// Fixed RNG seed for reproducible pages.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fibonacci_count: 20,
            array_size: 100,
            element_count: 10,
            table_rows: 20,
            word_count: 100,
            stagger_ms: 200,
            spin_ms: 1000,
            seed: None,
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let raw = std::fs::read_to_string(path).map_err(|source| DemoError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fibonacci_count > MAX_FIBONACCI_COUNT {
            return Err(DemoError::InvalidArgument(format!(
                "fibonacci_count {} exceeds {MAX_FIBONACCI_COUNT}",
                self.fibonacci_count
            )));
        }
        Ok(())
    }

    /// Virtual time after which every spin started by the animate control
    /// has been reset. Saturates at `u64::MAX`.
    pub fn animation_span_ms(&self) -> u64 {
        let last = self.element_count.saturating_sub(1) as u64;
        last.saturating_mul(self.stagger_ms).saturating_add(self.spin_ms)
    }
}
