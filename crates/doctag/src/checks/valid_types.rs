//! Structural tag-grammar enforcement from the profile table.
//!
//! Everything here is shape validation of a single block: unknown tag
//! names, preference redirects, required/forbidden type and name
//! payloads, type-expression syntax, disallowed co-tags, and allowed
//! attachment contexts. Resolution of type names lives elsewhere.

use doctag_core::{
    profile::{NameContents, profile_for},
    queries::{self, PreferredTag},
    tags,
};
use doctag_parser::parse_type;

use crate::{
    iterate::DocContext,
    report::{Reporter, Violation},
};

const CHECK: &str = "valid-types";

pub fn run(context: &DocContext<'_>, reporter: &mut dyn Reporter) {
    let settings = context.settings;
    let dialect = settings.dialect;
    let block = &context.block;
    let block_tags: Vec<&str> = block.tags.iter().map(|tag| tag.tag.as_str()).collect();

    for (index, tag) in block.tags.iter().enumerate() {
        let raw = tag.tag.as_str();
        let line = context.comment_line + tag.line;
        let anchored = |violation: Violation| violation.with_line(line).with_tag_index(index);

        if !queries::is_valid_tag(dialect, raw, &settings.defined_tags) {
            reporter.report(anchored(Violation::error(
                CHECK,
                format!("Invalid JSDoc tag name \"{raw}\"."),
            )));
            continue;
        }

        match queries::preferred_tag_name(dialect, raw, &settings.tag_name_preference) {
            PreferredTag::Blocked { message } => {
                let message = message
                    .unwrap_or_else(|| format!("Unexpected JSDoc tag \"@{raw}\"."));
                reporter.report(anchored(Violation::error(CHECK, message)));
                continue;
            }
            PreferredTag::Name(preferred) if preferred != raw => {
                reporter.report(anchored(Violation::error(
                    CHECK,
                    format!(
                        "Invalid JSDoc tag (preference). Replace \"{raw}\" JSDoc tag with \"{preferred}\"."
                    ),
                )));
            }
            PreferredTag::Name(_) => {}
        }

        let canonical = tags::canonical_name(dialect, raw).unwrap_or(raw);
        let profile = profile_for(dialect, canonical);
        let has_type = !tag.type_text.is_empty();
        let has_name = !tag.name.is_empty();

        if profile.type_required && !has_type {
            reporter.report(anchored(Violation::error(
                CHECK,
                format!("Tag @{raw} must have a type."),
            )));
        }
        if !profile.type_allowed && has_type {
            reporter.report(anchored(Violation::error(
                CHECK,
                format!("Types are not permitted on @{raw}."),
            )));
        }
        if profile.name_required && !has_name {
            reporter.report(anchored(Violation::error(
                CHECK,
                format!("Tag @{raw} must have a name/namepath."),
            )));
        }
        if profile.name_contents == NameContents::Disallowed && has_name {
            reporter.report(anchored(Violation::error(
                CHECK,
                format!("Namepaths are not permitted on @{raw}."),
            )));
        }
        if profile.type_or_name_required && !has_type && !has_name {
            reporter.report(anchored(Violation::error(
                CHECK,
                format!("Tag @{raw} must have either a type or namepath."),
            )));
        }

        if has_type && profile.type_allowed && parse_type(&tag.type_text).is_err() {
            reporter.report(anchored(Violation::error(
                CHECK,
                format!("Syntax error in type: {}", tag.type_text),
            )));
        }

        for cotag in &profile.disallowed_cotags {
            if block_tags
                .iter()
                .any(|present| present.eq_ignore_ascii_case(cotag))
            {
                reporter.report(anchored(Violation::error(
                    CHECK,
                    format!("Tag @{raw} may not be used together with @{cotag}."),
                )));
            }
        }

        if !profile.contexts.is_empty() {
            if let (Some(tree), Some(node)) = (context.tree, context.node) {
                let kind = tree.kind(node);
                let top_level = tree.is_top_level(node);
                let allowed = profile
                    .contexts
                    .iter()
                    .any(|selector| selector.matches(&kind, top_level, &block_tags));
                if !allowed {
                    reporter.report(anchored(Violation::error(
                        CHECK,
                        format!("Tag @{raw} is not allowed on this declaration."),
                    )));
                }
            }
        }
    }
}
