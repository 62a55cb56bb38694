//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Build the demo page, replay some interaction on it, and print what happened
#[derive(Parser, Debug)]
#[command(name = "demo-page")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML file overriding the generator defaults
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Seed the random source for a reproducible page
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Hover over the colored box at this position once the page is ready
    #[arg(long, value_name = "INDEX")]
    pub hover: Option<usize>,

    /// Click the animate control once the page is ready
    #[arg(short, long)]
    pub animate: bool,

    /// Virtual milliseconds to run after the interaction
    /// (default: long enough for a full animation when --animate is set)
    #[arg(long, value_name = "MS")]
    pub run_ms: Option<u64>,

    /// Write the final document as HTML to FILE ("-" for stdout)
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub html: Option<PathBuf>,

    /// Diagnostics on stderr: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
