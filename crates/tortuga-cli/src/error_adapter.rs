//! Error adapter for converting TortugaError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI. Parse
//! errors carry a byte offset into the source document; the adapter turns
//! that into a labeled source span so the report points at the offending
//! tag.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use tortuga::TortugaError;

/// Adapter wrapping a [`TortugaError`] for miette rendering.
pub struct ErrorAdapter(pub TortugaError);

impl fmt::Debug for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TortugaError::Io(_) => "tortuga::io",
            TortugaError::Parse { .. } => "tortuga::parse",
            TortugaError::Draw(_) => "tortuga::draw",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        None
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            TortugaError::Parse { src, .. } => Some(src),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let TortugaError::Parse { err, .. } = &self.0 else {
            return None;
        };
        let offset = err.offset()?;
        let span = SourceSpan::new(offset.into(), 1);
        let label = LabeledSpan::new_primary_with_span(Some("offending tag".to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}
