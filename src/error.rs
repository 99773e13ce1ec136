//! Error type shared by the fallible edges of the crate.
//!
//! The counter itself never fails; only snapshot transport, config and log
//! directory I/O can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaprError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[source] serde_json::Error),

    #[error("Unsupported snapshot version {found} (newest supported is {supported})")]
    UnsupportedSnapshot { found: u32, supported: u32 },

    #[error("Configuration error: {0}")]
    Config(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TaprError>;
