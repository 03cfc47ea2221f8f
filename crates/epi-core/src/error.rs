//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `EpiError` as one variant
//! via `#[from]`, so configuration problems surface with the same message
//! whichever crate detected them.

use thiserror::Error;

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EpiError {
    /// A missing or out-of-range parameter.  Raised before a run starts.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `epi-*` crates.
pub type EpiResult<T> = Result<T, EpiError>;
