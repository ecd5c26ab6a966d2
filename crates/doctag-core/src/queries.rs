//! Classification queries over the tag profile tables.
//!
//! These are the grammar facts the rest of the engine asks for: does a tag
//! carry a type, a name, a namepath; does it introduce a new identifier or
//! reference an existing one; is a tag name valid at all under a dialect;
//! which spelling of a tag does the user prefer.
//!
//! Every query is a pure lookup over [`profile_for`]; unknown tags fall
//! back to the permissive profile (no structural requirements).

use serde::Deserialize;

use crate::{
    dialect::Dialect,
    profile::{NameContents, profile_for},
    tags::{alias_table, canonical_name},
};

/// Whether the tag may carry a `{type}` bracket under this dialect.
pub fn might_have_type(dialect: Dialect, tag: &str) -> bool {
    let profile = profile_for(dialect, tag);
    profile.type_allowed || profile.type_required
}

/// Whether the tag must carry a `{type}` bracket under this dialect.
pub fn must_have_type(dialect: Dialect, tag: &str) -> bool {
    profile_for(dialect, tag).type_required
}

/// Whether the tag's name payload participates in namepath resolution.
pub fn might_have_namepath(dialect: Dialect, tag: &str) -> bool {
    profile_for(dialect, tag).name_contents.is_namepath()
}

/// Whether the tag requires a namepath name payload.
pub fn must_have_namepath(dialect: Dialect, tag: &str) -> bool {
    let profile = profile_for(dialect, tag);
    profile.name_contents.is_namepath() && profile.name_required
}

/// Whether the tag may carry any name payload at all.
pub fn might_have_name(dialect: Dialect, tag: &str) -> bool {
    profile_for(dialect, tag).name_contents != NameContents::Disallowed
}

/// Whether the tag requires a name payload.
pub fn must_have_name(dialect: Dialect, tag: &str) -> bool {
    profile_for(dialect, tag).name_required
}

/// Whether the tag's name payload introduces a new resolvable identifier.
pub fn is_namepath_defining(dialect: Dialect, tag: &str) -> bool {
    profile_for(dialect, tag).name_contents == NameContents::NamepathDefining
}

/// Whether the tag's name payload must resolve to a known identifier.
pub fn is_namepath_referencing(dialect: Dialect, tag: &str) -> bool {
    profile_for(dialect, tag).name_contents == NameContents::NamepathReferencing
}

/// Whether the tag's name payload is a namepath-or-URL reference: a
/// free-form payload that resolves as a namepath when it is neither a
/// URL nor an inline `{@link}` (`see`).
pub fn is_namepath_or_url_referencing(dialect: Dialect, tag: &str) -> bool {
    canonical_name(dialect, tag) == Some("see")
}

/// Whether the tag may carry either a type or a namepath.
pub fn might_have_either_type_or_namepath(dialect: Dialect, tag: &str) -> bool {
    might_have_type(dialect, tag) || might_have_namepath(dialect, tag)
}

/// Whether the tag requires at least one of a type or a name payload.
///
/// Satisfiable by either field: a tag taking only a namepath still counts
/// as satisfying "type or name" when the namepath is present.
pub fn must_have_either_type_or_namepath(dialect: Dialect, tag: &str) -> bool {
    profile_for(dialect, tag).type_or_name_required
}

/// Whether `name` is a valid tag under the dialect: known as a canonical
/// name or alias, or explicitly allowed through `defined_tags`.
pub fn is_valid_tag<S: AsRef<str>>(dialect: Dialect, name: &str, defined_tags: &[S]) -> bool {
    canonical_name(dialect, name).is_some()
        || defined_tags.iter().any(|tag| tag.as_ref() == name)
}

/// A user preference for one canonical tag name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagNamePreference {
    /// `false` disallows the tag entirely; `true` is a no-op.
    Allowed(bool),

    /// Prefer this spelling instead.
    Name(String),

    /// Prefer `replacement` (or disallow when absent), with a custom
    /// report message.
    Detailed {
        replacement: Option<String>,
        message: Option<String>,
    },
}

/// The outcome of resolving a tag name through the preference map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferredTag {
    /// Use this spelling.
    Name(String),

    /// The tag is disallowed; `message` overrides the default report.
    Blocked { message: Option<String> },
}

/// Resolve the preferred spelling for `name`.
///
/// Resolution order: a name that is itself someone's preferred value is
/// kept as-is; an explicit preference entry for `name` wins next; then the
/// dialect's alias table maps aliases to their canonical entry; otherwise
/// the name passes through unchanged.
pub fn preferred_tag_name<'a, P>(dialect: Dialect, name: &str, preferences: P) -> PreferredTag
where
    P: IntoIterator<Item = (&'a String, &'a TagNamePreference)> + Copy,
{
    let is_preferred_value = preferences.into_iter().any(|(_, pref)| match pref {
        TagNamePreference::Name(preferred) => preferred == name,
        TagNamePreference::Detailed {
            replacement: Some(replacement),
            ..
        } => replacement == name,
        _ => false,
    });
    if is_preferred_value {
        return PreferredTag::Name(name.to_owned());
    }

    if let Some((_, pref)) = preferences.into_iter().find(|(key, _)| key.as_str() == name) {
        return match pref {
            TagNamePreference::Allowed(true) => PreferredTag::Name(name.to_owned()),
            TagNamePreference::Allowed(false) => PreferredTag::Blocked { message: None },
            TagNamePreference::Name(preferred) => PreferredTag::Name(preferred.clone()),
            TagNamePreference::Detailed {
                replacement: Some(replacement),
                ..
            } => PreferredTag::Name(replacement.clone()),
            TagNamePreference::Detailed {
                replacement: None,
                message,
            } => PreferredTag::Blocked {
                message: message.clone(),
            },
        };
    }

    match canonical_name(dialect, name) {
        Some(canonical) => PreferredTag::Name(canonical.to_owned()),
        None => PreferredTag::Name(name.to_owned()),
    }
}

/// All tag names (canonical and alias) recognized by the dialect.
pub fn known_tag_names(dialect: Dialect) -> impl Iterator<Item = &'static str> {
    alias_table(dialect)
        .iter()
        .flat_map(|(canonical, aliases)| std::iter::once(*canonical).chain(aliases.iter().copied()))
}
