//! Persistent storage for the most recently opened project.
//!
//! The store keeps one small JSON object in the user's configuration
//! directory (`it/geoframe/subbasins-explorer`, the namespace of the
//! original installation). Persistence is best-effort: I/O failures are
//! swallowed with a log line, and anything the store cannot decode loads as
//! "no prior selection". The caller cannot tell a corrupt file from a
//! missing one.

mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::{SELECTION_FILE, SelectionStore};
