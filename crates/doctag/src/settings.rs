//! Analysis configuration.
//!
//! [`Settings`] is the per-analysis-unit configuration surface: the
//! active dialect, tag-name and type preferences, extra defined names,
//! structured per-tag overrides, and the behavioral toggles consumed by
//! individual checks. All fields are optional in serialized form and
//! default to the values [`Settings::default`] documents.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

use doctag_core::{dialect::Dialect, queries::TagNamePreference};

/// One entry of the `preferred_types` map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypePreference {
    /// `false` forbids the type outright; `true` is a no-op.
    Allowed(bool),

    /// A bare replacement type name.
    Replacement(String),

    /// A replacement with an optional custom message.
    Detailed {
        replacement: Option<String>,
        message: Option<String>,
    },
}

impl TypePreference {
    /// The replacement name this preference maps to, if any.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            TypePreference::Allowed(_) => None,
            TypePreference::Replacement(name) => Some(name),
            TypePreference::Detailed { replacement, .. } => replacement.as_deref(),
        }
    }
}

/// Structured overrides for a single tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StructuredTag {
    /// Bare type names always considered defined within this tag.
    #[serde(default)]
    pub types: Vec<String>,
}

/// When a generator's `yield` satisfies a documented `@returns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldAsReturn {
    /// Any `yield` counts.
    Always,

    /// Only `yield <expr>` counts.
    Argument,
}

/// Configuration for one analysis unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active tag-grammar dialect.
    pub dialect: Dialect,

    /// Canonical tag name to preference mapping.
    pub tag_name_preference: IndexMap<String, TagNamePreference>,

    /// Extra tag names accepted as valid beyond the dialect table.
    pub defined_tags: Vec<String>,

    /// Extra identifier names considered defined.
    pub defined_types: Vec<String>,

    /// Type-name preferences; replacement names also count as defined.
    pub preferred_types: IndexMap<String, TypePreference>,

    /// Per-tag structured overrides.
    pub structured_tags: IndexMap<String, StructuredTag>,

    /// Emit the used-variable side effect for resolved type names.
    pub mark_variables_as_used: bool,

    /// Permit surplus trailing `@param` entries beyond the actual
    /// parameter count.
    pub allow_extra_trailing_param_docs: bool,

    /// Generator yield semantics for the returns checks.
    pub yield_as_return: Option<YieldAsReturn>,

    /// Do not treat `async` as an implicit return value.
    pub ignore_async: bool,

    /// Node-kind names visited in attached mode. Empty means the
    /// default set: function-likes, classes, and method definitions.
    pub contexts: Vec<String>,

    /// Tags whose presence exempts a block from parameter checks.
    pub exempted_by: Vec<String>,

    /// Suppress undefined-type reports while keeping side effects.
    pub disable_reporting: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dialect: Dialect::default(),
            tag_name_preference: IndexMap::new(),
            defined_tags: Vec::new(),
            defined_types: Vec::new(),
            preferred_types: IndexMap::new(),
            structured_tags: IndexMap::new(),
            mark_variables_as_used: true,
            allow_extra_trailing_param_docs: false,
            yield_as_return: None,
            ignore_async: false,
            contexts: Vec::new(),
            exempted_by: vec!["inheritdoc".to_owned()],
            disable_reporting: false,
        }
    }
}

impl Settings {
    /// Bare type names always considered defined within `tag`.
    pub fn structured_types_for(&self, tag: &str) -> &[String] {
        self.structured_tags
            .get(tag)
            .map(|entry| entry.types.as_slice())
            .unwrap_or_default()
    }
}

/// Once-per-context deduplication of configuration warnings.
///
/// Keyed by (context, warning kind); the first insert wins and every
/// later insert is a no-op.
#[derive(Debug, Default)]
pub struct WarnTracker {
    seen: BTreeSet<(String, &'static str)>,
}

impl WarnTracker {
    pub fn new() -> Self {
        WarnTracker::default()
    }

    /// Whether this (context, kind) pair is being seen for the first
    /// time.
    pub fn first(&mut self, context: &str, kind: &'static str) -> bool {
        self.seen.insert((context.to_owned(), kind))
    }
}

/// Resolve a raw dialect string, falling back to the default dialect
/// with a single warning per context for unrecognized values.
pub fn resolve_dialect(raw: &str, context: &str, tracker: &mut WarnTracker) -> Dialect {
    match raw.parse() {
        Ok(dialect) => dialect,
        Err(_) => {
            if tracker.first(context, "unknown-dialect") {
                warn!(dialect = raw, context = context; "Unrecognized dialect, using jsdoc");
            }
            Dialect::Jsdoc
        }
    }
}
