//! Error adapter for converting violations and CLI errors to miette
//! diagnostics.
//!
//! This module provides the bridge between the engine's plain report
//! types and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use doctag::{Severity, Violation};

use crate::CliError;

/// Byte span of one 1-based line within `src`.
fn line_span(src: &str, line: usize) -> SourceSpan {
    let mut offset = 0;
    for (index, text) in src.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            return (offset, text.trim_end_matches('\n').len()).into();
        }
        offset += text.len();
    }
    (offset, 0).into()
}

/// Adapter for a single violation.
///
/// Wraps a [`Violation`] together with the file's source text and
/// implements [`MietteDiagnostic`] to enable rich formatting with a
/// snippet of the offending line.
pub struct ViolationAdapter<'a> {
    violation: &'a Violation,
    src: &'a str,
}

impl<'a> ViolationAdapter<'a> {
    /// Create a new violation adapter.
    pub fn new(violation: &'a Violation, src: &'a str) -> Self {
        Self { violation, src }
    }
}

impl fmt::Debug for ViolationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViolationAdapter")
            .field("violation", &self.violation)
            .finish()
    }
}

impl fmt::Display for ViolationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.violation.message)
    }
}

impl std::error::Error for ViolationAdapter<'_> {}

impl MietteDiagnostic for ViolationAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.violation.check))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.violation.severity {
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        })
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let line = self.violation.line?;
        let span = line_span(self.src, line);
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(self.violation.message.clone()), span),
        )))
    }
}

/// Adapter for CLI errors without violation context.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "doctag::io",
            CliError::Config(_) => "doctag::config",
            CliError::Engine(_) => "doctag::engine",
        };
        Some(Box::new(code))
    }
}
