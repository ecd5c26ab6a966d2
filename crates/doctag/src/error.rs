//! Engine error types.
//!
//! Analysis findings are never errors; they flow through the
//! [`Reporter`](crate::report::Reporter) sink as
//! [`Violation`](crate::report::Violation)s. `EngineError` covers only
//! contract violations surfaced before iteration begins.

use thiserror::Error;

/// Fatal contract errors raised before any declaration is visited.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// An analysis run was requested with no checks to execute.
    #[error("no checks were supplied for this analysis run")]
    NoChecks,
}
