//! Parser error types.

use thiserror::Error;

use crate::span::Span;

/// Failure to parse a type expression.
///
/// Doc-block parsing itself never fails; only the `{...}` type bracket
/// has a grammar strict enough to reject input. The offset is relative
/// to the bracket contents, not the enclosing comment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type expression at offset {}: {message}", span.start())]
pub struct TypeParseError {
    /// Span of the rejected input, relative to the bracket contents.
    pub span: Span,

    /// Human-readable description of what was expected.
    pub message: String,
}

impl TypeParseError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        TypeParseError {
            span,
            message: message.into(),
        }
    }
}
