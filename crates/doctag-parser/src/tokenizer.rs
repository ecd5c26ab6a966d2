//! Field extraction for one tag section of a doc block.
//!
//! A tag section's first line is tokenized through three successive
//! extractors (tag name, type bracket, name) with the remainder becoming
//! the description. Two dialect-independent skip rules apply:
//!
//! - the type and name extractors are skipped for a `@see` whose payload
//!   is an inline `{@link ...}` reference;
//! - the name extractor is skipped for tags that never carry a formal
//!   name (`@example`, `@returns`, `@throws`, ...).
//!
//! Malformed optional-name syntax (an unterminated `[`) never fails the
//! parse: the name stays empty and the remainder folds into the
//! description.

use log::debug;

/// Tags that never carry a formal name payload; name extraction is
/// skipped entirely for these.
pub const NO_NAME_TAGS: &[&str] = &[
    "example", "return", "returns", "throws", "exception", "access", "version", "since",
    "license", "author",
];

/// The tokenized fields of a tag section's first line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFields {
    pub tag: String,
    pub type_text: String,
    pub name: String,
    pub optional: bool,
    pub default: Option<String>,
    pub description: String,
}

/// Whether the payload after the tag looks like an inline link reference.
fn has_inline_link(rest: &str) -> bool {
    if let Some(start) = rest.find("{@link") {
        rest[start..].contains('}')
    } else {
        false
    }
}

/// Consume a balanced `{...}` bracket from the start of `input` (after
/// leading spaces), returning the bracket contents and the remainder.
///
/// Returns `None` when the input does not open with `{` or the bracket
/// never closes; the caller then treats the text as having no type.
fn take_type_bracket(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim_start_matches(' ');
    let inner = trimmed.strip_prefix('{')?;
    let mut depth = 1usize;
    for (offset, ch) in inner.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&inner[..offset], &inner[offset + ch.len_utf8()..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracted name token: the name itself plus optionality and default.
struct NameToken<'a> {
    name: &'a str,
    optional: bool,
    default: Option<&'a str>,
    rest: &'a str,
}

/// Consume a name token: either a bare word or the optional-name wrapper
/// `[name]` / `[name=default]`.
///
/// Returns `None` for an unterminated `[` (the malformed-name degrade
/// path) and for empty input.
fn take_name(input: &str) -> Option<NameToken<'_>> {
    let trimmed = input.trim_start_matches(' ');
    if trimmed.is_empty() {
        return None;
    }
    if let Some(inner) = trimmed.strip_prefix('[') {
        let close = inner.find(']')?;
        let wrapped = &inner[..close];
        let rest = &inner[close + 1..];
        let (name, default) = match wrapped.split_once('=') {
            Some((name, default)) => (name.trim(), Some(default.trim())),
            None => (wrapped.trim(), None),
        };
        Some(NameToken {
            name,
            optional: true,
            default,
            rest,
        })
    } else {
        let end = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        Some(NameToken {
            name: &trimmed[..end],
            optional: false,
            default: None,
            rest: &trimmed[end..],
        })
    }
}

/// Capture the description with a single-optional-leading-space rule:
/// exactly one separating space (if present) is consumed so a round-trip
/// never duplicates it.
fn take_description(input: &str) -> &str {
    input.strip_prefix(' ').unwrap_or(input)
}

/// Tokenize the first line of a tag section (the content after the `*`
/// line prefix, beginning with `@`).
pub fn tokenize_tag_line(content: &str) -> TagFields {
    let mut fields = TagFields::default();

    let Some(after_at) = content.strip_prefix('@') else {
        return fields;
    };
    let tag_end = after_at
        .find(char::is_whitespace)
        .unwrap_or(after_at.len());
    fields.tag = after_at[..tag_end].to_owned();
    let mut rest = &after_at[tag_end..];

    // Inline-link skip: `@see {@link Foo}` keeps the whole payload as
    // description; no type or name extraction is attempted.
    let skip_for_link = fields.tag == "see" && has_inline_link(rest);

    if !skip_for_link {
        if let Some((type_text, after_type)) = take_type_bracket(rest) {
            fields.type_text = type_text.to_owned();
            rest = after_type;
        }

        if !NO_NAME_TAGS.contains(&fields.tag.as_str()) {
            let trimmed = rest.trim_start_matches(' ');
            if trimmed.starts_with('[') && !trimmed.contains(']') {
                // Unterminated optional name: leave the name empty and
                // fold the remainder into the description.
                debug!(tag = fields.tag.as_str(); "unterminated optional-name bracket");
                fields.description = take_description(rest).to_owned();
                return fields;
            }
            if let Some(token) = take_name(rest) {
                fields.name = token.name.to_owned();
                fields.optional = token.optional;
                fields.default = token.default.map(str::to_owned);
                rest = token.rest;
            }
        }
    }

    fields.description = take_description(rest).to_owned();
    fields
}
