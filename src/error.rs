//! # Errors
//!
//! All fallible operations of this crate return [`Result`]. The error taxonomy
//! is deliberately small:
//! - [`Error::Parse`] for malformed graph files (always surfaced, never recovered silently),
//! - [`Error::ResourceExhausted`] when a per-run array cannot be allocated,
//! - [`Error::Cancelled`] when a [`ProgressObserver`](crate::progress::ProgressObserver)
//!   requested a stop (a normal alternate outcome, not a failure),
//! - [`Error::Io`] for plain I/O failures while reading or writing files.
//!
//! Broken internal invariants (heap underflow, missing predecessors) are
//! programming errors and panic instead of being reported here.

use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input file does not match the expected graph format.
    /// `line` is 1-based and points at the offending line.
    #[error("parse error in line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// An allocation sized by the input graph failed.
    #[error("out of memory: {0}")]
    ResourceExhausted(#[from] TryReserveError),

    /// The observer's cancellation flag tripped between two visits.
    #[error("computation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse<S: Into<String>>(line: usize, reason: S) -> Self {
        Error::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Returns *true* if this is the cooperative-cancellation outcome.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Shorthand for returning `Err(Error::Parse)` early when a condition fails
macro_rules! raise_parse_error_unless {
    ($cond:expr, $line:expr, $reason:expr) => {
        if !($cond) {
            return Err($crate::error::Error::parse($line, $reason));
        }
    };
}

pub(crate) use raise_parse_error_unless;
