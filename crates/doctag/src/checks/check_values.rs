//! Payload validation for value-carrying tags.

use crate::{
    iterate::DocContext,
    report::{Reporter, Violation},
};

const CHECK: &str = "check-values";

/// Tags whose payload is a free-form value that must not be empty.
const VALUE_TAGS: [&str; 4] = ["version", "since", "license", "author"];

pub fn run(context: &DocContext<'_>, reporter: &mut dyn Reporter) {
    for (index, tag) in context.block.tags.iter().enumerate() {
        let Some(kind) = VALUE_TAGS
            .iter()
            .copied()
            .find(|name| tag.tag.eq_ignore_ascii_case(name))
        else {
            continue;
        };
        let line = context.comment_line + tag.line;

        let payload = if tag.name.is_empty() {
            tag.description.trim().to_owned()
        } else {
            format!("{} {}", tag.name, tag.description)
                .trim()
                .to_owned()
        };

        if payload.is_empty() {
            reporter.report(
                Violation::error(CHECK, format!("Missing JSDoc @{kind} value."))
                    .with_line(line)
                    .with_tag_index(index),
            );
            continue;
        }

        if kind == "author" && payload.contains('<') && !payload.contains('>') {
            reporter.report(
                Violation::error(
                    CHECK,
                    "Invalid JSDoc @author value; expected \"Name <email>\" format.",
                )
                .with_line(line)
                .with_tag_index(index),
            );
        }
    }
}
