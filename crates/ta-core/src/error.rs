//! Workspace base error type.
//!
//! Sub-crates define their own error enums (`NetworkError`, `AssignError`,
//! `TntpError`); `TaError` covers what lives in `ta-core` itself.

use thiserror::Error;

/// Errors produced by `ta-core`.
#[derive(Debug, Error)]
pub enum TaError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ta-core`.
pub type TaResult<T> = Result<T, TaError>;
