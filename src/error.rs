//! Errors for the fallible edges of the crate.
//!
//! Dictionary operations are total and never return an error; only report
//! output and configuration parsing can fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZipfError {
    /// Writing a report artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A hash precision name that is neither `single` nor `double`.
    #[error("invalid hash precision `{0}` (expected `single` or `double`)")]
    InvalidPrecision(String),
}

pub type Result<T> = std::result::Result<T, ZipfError>;
