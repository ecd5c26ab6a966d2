//! Type-expression identifier resolution.
//!
//! Walks every tag that can carry a type or a referencing namepath,
//! parses the relevant raw field, and reports each leaf name absent
//! from the identifier universe. Parse failures are swallowed here; the
//! valid-types check owns syntax reporting.

use doctag_core::{block::ParsedCommentBlock, queries};
use doctag_parser::{collect_names, parse_type};

use crate::{
    report::{Reporter, Violation},
    settings::Settings,
    universe::{IdentifierUniverse, is_primitive},
};

const CHECK: &str = "no-undefined-types";

/// Resolve every type reference in one block against the universe.
///
/// `comment_line` is the 1-based source line of the block opener; tag
/// line offsets are added to it for anchoring.
pub fn resolve_block(
    block: &ParsedCommentBlock,
    comment_line: usize,
    universe: &IdentifierUniverse,
    settings: &Settings,
    reporter: &mut dyn Reporter,
) {
    let dialect = settings.dialect;
    for (index, tag) in block.tags.iter().enumerate() {
        let mut texts: Vec<&str> = Vec::new();
        if queries::might_have_type(dialect, &tag.tag) && !tag.type_text.is_empty() {
            texts.push(&tag.type_text);
        }
        if queries::is_namepath_referencing(dialect, &tag.tag) && !tag.name.is_empty() {
            texts.push(&tag.name);
        } else if queries::is_namepath_or_url_referencing(dialect, &tag.tag)
            && !tag.name.is_empty()
            && !is_url(&tag.name)
        {
            texts.push(&tag.name);
        }

        for text in texts {
            let Ok(parsed) = parse_type(text) else {
                continue;
            };
            for name in collect_names(&parsed) {
                if settings
                    .structured_types_for(&tag.tag)
                    .iter()
                    .any(|allowed| allowed == &name)
                {
                    continue;
                }
                match resolve_name(&name, universe) {
                    Some(resolved) => {
                        if settings.mark_variables_as_used && !is_primitive(resolved) {
                            reporter.mark_variable_used(resolved);
                        }
                    }
                    None => {
                        if !settings.disable_reporting {
                            reporter.report(
                                Violation::error(
                                    CHECK,
                                    format!("The type '{name}' is undefined."),
                                )
                                .with_line(comment_line + tag.line)
                                .with_tag_index(index),
                            );
                        }
                    }
                }
            }
        }
    }
}

/// URL payloads on namepath-or-URL tags are references to external
/// documents, not namepaths.
fn is_url(payload: &str) -> bool {
    payload.contains("://") || payload.starts_with("mailto:")
}

/// Look a leaf name up in the universe: the full namepath first, then
/// its root segment (a member path resolves through its root binding).
fn resolve_name<'a>(name: &'a str, universe: &IdentifierUniverse) -> Option<&'a str> {
    if universe.has(name) {
        return Some(name);
    }
    let root = name
        .split(['.', '#', '~'])
        .next()
        .filter(|root| !root.is_empty() && *root != name)?;
    universe.has(root).then_some(root)
}
