//! Missing `@param` root detection with insert fixes.

use crate::{iterate::DocContext, reconcile, report::Reporter};

pub fn run(context: &DocContext<'_>, reporter: &mut dyn Reporter) {
    if context.function_node().is_none() {
        return;
    }
    reconcile::check_missing_params(
        context.params(),
        &context.block,
        context.settings,
        context.comment_line,
        reporter,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{iterate::DocContext, report::Collector, settings::Settings, universe::IdentifierUniverse};
    use doctag_core::ast::{NodeKind, ParamPattern, SourceTree};
    use doctag_parser::parse_comment;

    #[test]
    fn test_skipped_without_a_function_node() {
        let settings = Settings::default();
        let context = DocContext {
            node: None,
            tree: None,
            block: parse_comment("/**\n * @param foo\n */"),
            comment_line: 1,
            universe: IdentifierUniverse::new(),
            settings: &settings,
        };
        let mut collector = Collector::new();
        run(&context, &mut collector);
        assert!(collector.violations.is_empty());
    }

    #[test]
    fn test_reports_missing_root() {
        let mut tree = SourceTree::new();
        let function = tree.add(tree.root(), NodeKind::FunctionDeclaration);
        tree.set_params(
            function,
            vec![
                ParamPattern::Name("foo".to_owned()),
                ParamPattern::Name("bar".to_owned()),
            ],
        );

        let settings = Settings::default();
        let context = DocContext {
            node: Some(function),
            tree: Some(&tree),
            block: parse_comment("/**\n * @param foo\n */"),
            comment_line: 1,
            universe: IdentifierUniverse::new(),
            settings: &settings,
        };
        let mut collector = Collector::new();
        run(&context, &mut collector);
        assert_eq!(
            collector.messages(),
            vec!["Missing JSDoc @param \"bar\" declaration."]
        );
    }
}
