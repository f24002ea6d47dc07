//! Error taxonomy for crlint.
//!
//! Checks never fail: absent or malformed inputs degrade to "no diagnostic".
//! Errors only surface at the edges: loading facts, or fetching content
//! (which the scanner turns into a skip).

/// Errors produced while fetching file content for a scan.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid content path: {0}")]
    InvalidPath(String),

    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// crlint library errors.
#[derive(Debug, thiserror::Error)]
pub enum CrlintError {
    #[error("invalid facts document: {0}")]
    InvalidFacts(String),
}

/// Result type for crlint operations.
pub type Result<T> = std::result::Result<T, CrlintError>;
