//! Type-reference resolution against the identifier universe.

use crate::{iterate::DocContext, report::Reporter, resolve};

pub fn run(context: &DocContext<'_>, reporter: &mut dyn Reporter) {
    resolve::resolve_block(
        &context.block,
        context.comment_line,
        &context.universe,
        context.settings,
        reporter,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{report::Collector, settings::Settings, universe::IdentifierUniverse};
    use doctag_parser::parse_comment;

    #[test]
    fn test_runs_without_a_node() {
        let settings = Settings::default();
        let context = DocContext {
            node: None,
            tree: None,
            block: parse_comment("/**\n * @param {Widget} w\n */"),
            comment_line: 1,
            universe: IdentifierUniverse::new(),
            settings: &settings,
        };
        let mut collector = Collector::new();
        run(&context, &mut collector);
        assert_eq!(
            collector.messages(),
            vec!["The type 'Widget' is undefined."]
        );
    }

    #[test]
    fn test_see_reference_resolved_like_a_type() {
        let settings = Settings::default();
        for comment in [
            "/**\n * @type {UndefinedThing}\n */",
            "/**\n * @see UndefinedThing\n */",
        ] {
            let context = DocContext {
                node: None,
                tree: None,
                block: parse_comment(comment),
                comment_line: 1,
                universe: IdentifierUniverse::new(),
                settings: &settings,
            };
            let mut collector = Collector::new();
            run(&context, &mut collector);
            assert_eq!(
                collector.messages(),
                vec!["The type 'UndefinedThing' is undefined."],
                "{comment}"
            );
        }
    }
}
