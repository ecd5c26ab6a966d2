//! Doc-comment parsing for the doctag analysis engine.
//!
//! This crate turns raw comment text into the structured form consumed
//! by analysis: [`block::parse_comment`] for whole doc blocks,
//! [`type_expr::parse_type`] for `{...}` type brackets, and
//! [`import::parse_import_bindings`] for `@import` payloads. Block
//! parsing is loss-free; [`block::stringify_block`] reproduces unedited
//! input byte for byte, which is what makes textual auto-fixes safe.

pub mod block;
pub mod error;
pub mod import;
pub mod span;
pub mod tokenizer;
pub mod type_expr;

pub use block::{parse_comment, stringify_block};
pub use error::TypeParseError;
pub use import::{ImportBindings, parse_import_bindings};
pub use span::Span;
pub use type_expr::{TypeExpr, collect_names, parse_type, walk_names};
