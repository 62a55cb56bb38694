//! Error type shared by the generator and its hosts.

use std::path::PathBuf;

use dom::NodeId;
use dom::tree::DomError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The host has no live display tree (not loaded, or already torn down).
    #[error("display host is not available")]
    HostUnavailable,

    #[error("unknown display node {0:?}")]
    UnknownNode(NodeId),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DemoError>;
