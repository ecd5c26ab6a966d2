//! Access-level tag consistency.

use crate::{
    iterate::DocContext,
    report::{Reporter, Violation},
};

const CHECK: &str = "check-access";

const LEVELS: [&str; 4] = ["package", "private", "protected", "public"];

pub fn run(context: &DocContext<'_>, reporter: &mut dyn Reporter) {
    let block = &context.block;
    let mut control_tags = 0;
    let mut has_access_tag = false;
    let mut has_level_tag = false;
    let mut first_line = None;

    for (index, tag) in block.tags.iter().enumerate() {
        let line = context.comment_line + tag.line;
        if tag.tag.eq_ignore_ascii_case("access") {
            control_tags += 1;
            has_access_tag = true;
            first_line.get_or_insert(line);
            let level = tag.description.trim();
            if !LEVELS.contains(&level) {
                reporter.report(
                    Violation::error(CHECK, "Missing valid JSDoc @access level.")
                        .with_line(line)
                        .with_tag_index(index),
                );
            }
        } else if LEVELS
            .iter()
            .any(|level| tag.tag.eq_ignore_ascii_case(level))
        {
            control_tags += 1;
            has_level_tag = true;
            first_line.get_or_insert(line);
        }
    }

    if has_access_tag && has_level_tag {
        reporter.report(
            Violation::error(
                CHECK,
                "The @access tag may not be used with specific access-modifier tags.",
            )
            .with_line(first_line.unwrap_or(context.comment_line)),
        );
    } else if control_tags > 1 {
        reporter.report(
            Violation::error(CHECK, "At most one access-control tag may be present.")
                .with_line(first_line.unwrap_or(context.comment_line)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{report::Collector, settings::Settings, universe::IdentifierUniverse};
    use doctag_parser::parse_comment;

    fn check(source: &str) -> Vec<String> {
        let settings = Settings::default();
        let context = DocContext {
            node: None,
            tree: None,
            block: parse_comment(source),
            comment_line: 1,
            universe: IdentifierUniverse::new(),
            settings: &settings,
        };
        let mut collector = Collector::new();
        run(&context, &mut collector);
        collector
            .messages()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_valid_access_level_passes() {
        assert!(check("/**\n * @access protected\n */").is_empty());
    }

    #[test]
    fn test_missing_level_reported() {
        assert_eq!(
            check("/**\n * @access\n */"),
            vec!["Missing valid JSDoc @access level."]
        );
    }

    #[test]
    fn test_unknown_level_reported() {
        assert_eq!(
            check("/**\n * @access friendly\n */"),
            vec!["Missing valid JSDoc @access level."]
        );
    }

    #[test]
    fn test_access_mixed_with_level_tag_reported() {
        assert_eq!(
            check("/**\n * @access private\n * @private\n */"),
            vec!["The @access tag may not be used with specific access-modifier tags."]
        );
    }

    #[test]
    fn test_duplicate_level_tags_reported() {
        assert_eq!(
            check("/**\n * @public\n * @private\n */"),
            vec!["At most one access-control tag may be present."]
        );
    }

    #[test]
    fn test_single_level_tag_passes() {
        assert!(check("/**\n * @private\n */").is_empty());
    }
}
