//! `@returns` present but no reachable return value.

use doctag_core::tags;

use crate::{
    iterate::DocContext,
    report::{Reporter, Violation},
    returns,
};

const CHECK: &str = "require-returns-check";

/// Types whose presence on `@returns` asserts the absence of a value.
const VOID_TYPES: [&str; 3] = ["void", "undefined", "never"];

pub fn run(context: &DocContext<'_>, reporter: &mut dyn Reporter) {
    let Some(function) = context.function_node() else {
        return;
    };
    let Some(tree) = context.tree else {
        return;
    };
    let block = &context.block;
    if block.has_tag("abstract") || block.has_tag("virtual") {
        return;
    }

    let dialect = context.settings.dialect;
    let returns_tag = block.tags.iter().enumerate().find(|(_, tag)| {
        matches!(
            tags::canonical_name(dialect, &tag.tag),
            Some("returns" | "return")
        )
    });
    let Some((index, tag)) = returns_tag else {
        return;
    };
    if VOID_TYPES.contains(&tag.type_text.trim()) {
        return;
    }

    if !returns::has_return_value(tree, function, context.settings) {
        reporter.report(
            Violation::error(
                CHECK,
                "JSDoc @returns declaration present but return expression not available in function.",
            )
            .with_line(context.comment_line + tag.line)
            .with_tag_index(index),
        );
    }
}
