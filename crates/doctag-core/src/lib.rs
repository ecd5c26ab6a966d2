//! # doctag-core
//!
//! Core types and grammar tables for the doctag analysis engine: the
//! dialect vocabulary, per-tag structural profiles and classification
//! queries, the parsed comment-block data model, and the boundary
//! representations of the host's syntax tree and scope chain.
//!
//! This crate is pure data and pure functions: no I/O, no parsing of raw
//! text (that lives in `doctag-parser`), no diagnostics (those live in
//! `doctag`).

pub mod ast;
pub mod block;
pub mod dialect;
pub mod profile;
pub mod queries;
pub mod scope;
pub mod tags;

pub use ast::{CommentRecord, NodeId, NodeKind, ParamPattern, SourceTree};
pub use block::{ParsedCommentBlock, ParsedTagRecord, TagEdit};
pub use dialect::{Dialect, UnknownDialect};
pub use profile::{ContextSelector, NameContents, TagProfile, profile_for};
pub use scope::{ScopeChain, ScopeId, ScopeKind};
