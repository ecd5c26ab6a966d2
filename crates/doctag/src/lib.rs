//! # doctag
//!
//! The doc-comment analysis engine: identifier-universe construction,
//! type-reference resolution, parameter reconciliation with auto-fix
//! edits, return-reachability matching, the per-declaration iteration
//! driver, and the built-in check set.
//!
//! Grammar tables and the block data model live in `doctag-core`; raw
//! text parsing lives in `doctag-parser`. This crate composes the two
//! and turns documented declarations into [`report::Violation`]s.

pub mod checks;
pub mod error;
pub mod iterate;
pub mod reconcile;
pub mod report;
pub mod resolve;
pub mod returns;
pub mod settings;
pub mod universe;

pub use checks::{BuiltinCheck, analyze_comments, analyze_file};
pub use error::EngineError;
pub use iterate::DocContext;
pub use report::{Collector, Reporter, Severity, Violation};
pub use settings::{Settings, WarnTracker, YieldAsReturn, resolve_dialect};
pub use universe::{IdentifierUniverse, build_universe};
