//! Error types for the navigation core.

use thiserror::Error;

/// Errors surfaced by file-level operations (`.maze` records and episode
/// artifacts).
///
/// The in-memory navigation core never returns these: out-of-bounds
/// mutations are silent no-ops and missing plans or persistence records
/// read as `false`/`None` for callers to handle.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid maze record: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, Error>;
