//! Doc-tag grammar dialects.
//!
//! A [`Dialect`] selects which tag vocabulary and which structural rules
//! apply when a comment block is analyzed. The four dialects correspond to
//! the grammars in common use: plain JSDoc, the TypeScript superset, the
//! Closure Compiler annotation style, and a permissive mode that accepts
//! whatever any of the others would.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// The tag grammar governing which tags and structures are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// The standard JSDoc grammar.
    #[default]
    Jsdoc,

    /// The TypeScript-flavoured superset (adds `@template`, `@import`,
    /// and the utility-type globals).
    Typescript,

    /// The Closure Compiler annotation style (adds its own tag set and
    /// grants optional types to several access-modifier tags).
    Closure,

    /// Accepts anything any other dialect accepts.
    Permissive,
}

impl Dialect {
    /// All dialects, in a stable order.
    pub const ALL: [Dialect; 4] = [
        Dialect::Jsdoc,
        Dialect::Typescript,
        Dialect::Closure,
        Dialect::Permissive,
    ];

    /// Canonical lowercase name of the dialect.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Jsdoc => "jsdoc",
            Dialect::Typescript => "typescript",
            Dialect::Closure => "closure",
            Dialect::Permissive => "permissive",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dialect name is not recognized.
///
/// Callers are expected to fall back to [`Dialect::Jsdoc`] and warn once
/// per analysis context rather than abort.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized dialect value `{0}`")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jsdoc" => Ok(Dialect::Jsdoc),
            "typescript" => Ok(Dialect::Typescript),
            "closure" => Ok(Dialect::Closure),
            "permissive" => Ok(Dialect::Permissive),
            other => Err(UnknownDialect(other.to_owned())),
        }
    }
}
