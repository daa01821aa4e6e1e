//! Error types for Tortuga operations.
//!
//! This module provides the main error type [`TortugaError`] which wraps
//! the error conditions that can occur while processing a scene.

use std::io;

use thiserror::Error;

use tortuga_core::draw::DrawError;
use tortuga_parser::ParseError;

/// The main error type for Tortuga operations.
///
/// The `Parse` variant keeps the source text alongside the structured
/// error, so callers can point reports back at the offending offset.
#[derive(Debug, Error)]
pub enum TortugaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Draw error: {0}")]
    Draw(#[from] DrawError),
}

impl TortugaError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
