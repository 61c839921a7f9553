//! Store error types.
//!
//! These never escape the crate's public `save`/`load`/`clear` surface;
//! they exist so the internal I/O paths can use `?` and the public surface
//! can decide what to swallow.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to {operation} selection file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Selection file is not valid JSON: {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No user configuration directory is available")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, StoreError>;
