//! Parameter reconciliation: documented `@param` entries against the
//! declared parameter list.
//!
//! Two entry points share the machinery: [`check_missing_params`]
//! (root presence with an insertion fix) and [`check_param_names`]
//! (dotted-path anchoring, duplicates, nesting consistency, ordering,
//! with a removal fix for duplicates). Dotted entries such as
//! `opts.verbose` are children of the nearest preceding non-dotted
//! entry, which anchors every mismatch diagnostic.
//!
//! Fixes never mutate during the diagnostic pass; they are emitted as
//! [`TagEdit`] batches whose indices refer to the unedited sequence.

use doctag_core::{
    ast::ParamPattern,
    block::{ParsedCommentBlock, ParsedTagRecord, TagEdit},
    dialect::Dialect,
    tags,
};

use crate::{
    report::{Reporter, Violation},
    settings::Settings,
};

const REQUIRE_PARAM: &str = "require-param";
const CHECK_PARAM_NAMES: &str = "check-param-names";

/// One documented parameter entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentedParam {
    /// Index of the tag within the block's tag sequence.
    pub tag_index: usize,

    /// The normalized name (optional-bracket wrapper already unwrapped
    /// by the tokenizer).
    pub name: String,

    /// 0-based line offset within the block.
    pub line: usize,
}

impl DocumentedParam {
    /// Whether this entry documents a nested property path.
    pub fn is_dotted(&self) -> bool {
        self.name.contains('.')
    }

    /// The path's root segment.
    pub fn root(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    /// The first property segment below the root, for dotted entries.
    fn property(&self) -> Option<&str> {
        self.name.split('.').nth(1)
    }
}

fn is_param_tag(dialect: Dialect, tag: &str) -> bool {
    tags::canonical_name(dialect, tag) == Some("param")
}

/// All documented parameter entries of a block, in document order.
/// Alias spellings (`arg`, `argument`) are included.
pub fn documented_params(block: &ParsedCommentBlock, dialect: Dialect) -> Vec<DocumentedParam> {
    block
        .tags
        .iter()
        .enumerate()
        .filter(|(_, tag)| is_param_tag(dialect, &tag.tag))
        .map(|(index, tag)| DocumentedParam {
            tag_index: index,
            name: tag.name.clone(),
            line: tag.line,
        })
        .collect()
}

/// Whether a block opts out of parameter checks: a function-level
/// `@type` declares the whole signature, and configured exemption tags
/// (`@inheritdoc` by default) defer to inherited documentation.
pub fn is_exempt(block: &ParsedCommentBlock, settings: &Settings) -> bool {
    block.has_tag("type") || block.has_a_tag(&settings.exempted_by)
}

/// The name a missing-parameter diagnostic uses for the parameter at
/// `index`: its own name, or a synthesized `rootN` for destructured
/// patterns.
fn missing_name(param: &ParamPattern, index: usize) -> String {
    if param.destructured_properties().is_some() {
        format!("root{index}")
    } else {
        param.representative_name().to_owned()
    }
}

/// Compute the tag-sequence slot a missing parameter's entry should be
/// inserted at: just after the last entry (including its dotted
/// children) documenting a parameter that precedes the missing one,
/// falling back to the first parameter entry, then to the end.
pub fn expected_slot(
    block: &ParsedCommentBlock,
    dialect: Dialect,
    params: &[ParamPattern],
    missing_index: usize,
) -> usize {
    let mut first_param_tag = None;
    let mut after_prior = None;
    for (index, tag) in block.tags.iter().enumerate() {
        if !is_param_tag(dialect, &tag.tag) {
            continue;
        }
        if first_param_tag.is_none() {
            first_param_tag = Some(index);
        }
        let root = tag.name.split('.').next().unwrap_or("");
        let position = params
            .iter()
            .position(|param| param.representative_name() == root);
        if position.is_some_and(|position| position < missing_index) {
            after_prior = Some(index + 1);
        }
    }
    after_prior
        .or(first_param_tag)
        .unwrap_or(block.tags.len())
}

/// Root presence: every real parameter must have a documented entry.
///
/// Each missing root is reported once, carrying a fix that inserts a
/// synthesized entry at the computed slot. Array-destructuring
/// patterns are skipped; the doc grammar has no syntax for them.
pub fn check_missing_params(
    params: &[ParamPattern],
    block: &ParsedCommentBlock,
    settings: &Settings,
    comment_line: usize,
    reporter: &mut dyn Reporter,
) {
    if is_exempt(block, settings) {
        return;
    }
    let docs = documented_params(block, settings.dialect);
    let roots: Vec<&DocumentedParam> = docs.iter().filter(|doc| !doc.is_dotted()).collect();

    for (index, param) in params.iter().enumerate() {
        if param.is_array_pattern() {
            continue;
        }
        let present = if param.destructured_properties().is_some() {
            index < roots.len()
        } else {
            roots
                .iter()
                .any(|doc| doc.name == param.representative_name())
        };
        if present {
            continue;
        }
        let name = missing_name(param, index);
        let slot = expected_slot(block, settings.dialect, params, index);
        reporter.report(
            Violation::error(
                REQUIRE_PARAM,
                format!("Missing JSDoc @param \"{name}\" declaration."),
            )
            .with_line(comment_line)
            .with_fix(vec![TagEdit::Insert {
                index: slot,
                record: ParsedTagRecord::synthesized("param", name.clone()),
            }]),
        );
    }
}

/// Anchoring, duplicates, nesting consistency, and ordering.
pub fn check_param_names(
    params: &[ParamPattern],
    block: &ParsedCommentBlock,
    settings: &Settings,
    comment_line: usize,
    reporter: &mut dyn Reporter,
) {
    if is_exempt(block, settings) {
        return;
    }
    let docs = documented_params(block, settings.dialect);

    // Pass 1: dotted-path anchoring and duplicate detection.
    let mut last_real: Option<&str> = None;
    let mut seen: Vec<&str> = Vec::new();
    let mut duplicates = false;
    for doc in &docs {
        if doc.is_dotted() {
            match last_real {
                None => reporter.report(
                    Violation::error(
                        CHECK_PARAM_NAMES,
                        format!(
                            "@param path declaration (\"{}\") appears before any real parameter.",
                            doc.name
                        ),
                    )
                    .with_line(comment_line + doc.line)
                    .with_tag_index(doc.tag_index),
                ),
                Some(previous) if doc.root() != previous => reporter.report(
                    Violation::error(
                        CHECK_PARAM_NAMES,
                        format!(
                            "@param path declaration (\"{}\") root node name (\"{}\") does not match previous real parameter name (\"{previous}\").",
                            doc.name,
                            doc.root(),
                        ),
                    )
                    .with_line(comment_line + doc.line)
                    .with_tag_index(doc.tag_index),
                ),
                Some(_) => {}
            }
        } else {
            last_real = Some(&doc.name);
        }

        if seen.contains(&doc.name.as_str()) {
            duplicates = true;
            reporter.report(
                Violation::error(
                    CHECK_PARAM_NAMES,
                    format!("Duplicate @param \"{}\"", doc.name),
                )
                .with_line(comment_line + doc.line)
                .with_tag_index(doc.tag_index)
                .with_fix(vec![TagEdit::Remove {
                    index: doc.tag_index,
                }]),
            );
        } else {
            seen.push(&doc.name);
        }
    }
    // Nesting and ordering against a sequence with duplicates would
    // double-report; the duplicate fix restores a clean sequence first.
    if duplicates {
        return;
    }

    let real_docs: Vec<&DocumentedParam> = docs.iter().filter(|doc| !doc.is_dotted()).collect();

    // Pass 2: nesting consistency, positionally pairing the i-th real
    // entry with the i-th actual parameter.
    for (index, param) in params.iter().enumerate() {
        let Some(doc) = real_docs.get(index) else {
            continue;
        };
        let children: Vec<&DocumentedParam> = docs
            .iter()
            .filter(|entry| entry.is_dotted() && entry.root() == doc.name)
            .collect();

        if let Some(properties) = param.destructured_properties() {
            if children.is_empty() {
                reporter.report(
                    Violation::error(
                        CHECK_PARAM_NAMES,
                        format!(
                            "@param \"{}\" declaration is not nested while its corresponding parameter is a destructured object.",
                            doc.name
                        ),
                    )
                    .with_line(comment_line + doc.line)
                    .with_tag_index(doc.tag_index),
                );
                continue;
            }
            for property in properties {
                let documented = children
                    .iter()
                    .any(|child| child.property() == Some(property.as_str()));
                if !documented {
                    reporter.report(
                        Violation::error(
                            CHECK_PARAM_NAMES,
                            format!("Missing JSDoc @param \"{}.{property}\" declaration.", doc.name),
                        )
                        .with_line(comment_line + doc.line)
                        .with_tag_index(doc.tag_index),
                    );
                }
            }
            for child in &children {
                let matches = child
                    .property()
                    .is_some_and(|property| properties.iter().any(|name| name == property));
                if !matches {
                    reporter.report(
                        Violation::error(
                            CHECK_PARAM_NAMES,
                            format!(
                                "@param \"{}\" declaration does not match the nested parameter name.",
                                child.name
                            ),
                        )
                        .with_line(comment_line + child.line)
                        .with_tag_index(child.tag_index),
                    );
                }
            }
        } else if !param.is_array_pattern() && !children.is_empty() {
            reporter.report(
                Violation::error(
                    CHECK_PARAM_NAMES,
                    format!(
                        "@param \"{}\" declaration is nested while its corresponding parameter is not nested.",
                        children[0].name
                    ),
                )
                .with_line(comment_line + children[0].line)
                .with_tag_index(children[0].tag_index),
            );
        }
    }

    // Pass 3: ordering, positional comparison of real entries. The
    // first mismatch reports both full lists; surplus trailing entries
    // report individually unless allowed.
    for (index, doc) in real_docs.iter().enumerate() {
        let Some(param) = params.get(index) else {
            if !settings.allow_extra_trailing_param_docs {
                reporter.report(
                    Violation::error(
                        CHECK_PARAM_NAMES,
                        format!(
                            "@param \"{}\" does not match an existing function parameter.",
                            doc.name
                        ),
                    )
                    .with_line(comment_line + doc.line)
                    .with_tag_index(doc.tag_index),
                );
            }
            continue;
        };
        if param.destructured_properties().is_some() || param.is_array_pattern() {
            continue;
        }
        if doc.name != param.representative_name() {
            let expected: Vec<&str> = params
                .iter()
                .map(|param| param.representative_name())
                .collect();
            let got: Vec<&str> = real_docs.iter().map(|doc| doc.name.as_str()).collect();
            reporter.report(
                Violation::error(
                    CHECK_PARAM_NAMES,
                    format!(
                        "Expected @param names to be \"{}\". Got \"{}\".",
                        expected.join(", "),
                        got.join(", ")
                    ),
                )
                .with_line(comment_line + doc.line)
                .with_tag_index(doc.tag_index),
            );
            break;
        }
    }
}
