//! End-to-end lint scenarios through the public engine API: syntax
//! tree plus raw comments in, violations and fixes out.

use doctag::{BuiltinCheck, Collector, Settings, YieldAsReturn, analyze_comments, analyze_file};
use doctag_core::{
    ast::{CommentRecord, NodeId, NodeKind, ParamPattern, SourceTree},
    dialect::Dialect,
    scope::ScopeChain,
};
use doctag_parser::{parse_comment, stringify_block};

/// A doc comment whose opener sits on `line`, from full `/** */` text.
fn doc_comment(source: &str, line: usize) -> CommentRecord {
    let payload = source
        .strip_prefix("/*")
        .and_then(|rest| rest.strip_suffix("*/"))
        .unwrap_or(source);
    CommentRecord {
        text: payload.to_owned(),
        line,
        column: 0,
        block_style: true,
    }
}

/// A documented function starting right below a block opened on line 1.
fn documented_function(comment: &str, params: Vec<ParamPattern>) -> (SourceTree, NodeId, Vec<CommentRecord>) {
    let mut tree = SourceTree::new();
    let function = tree.add(tree.root(), NodeKind::FunctionDeclaration);
    tree.set_params(function, params);
    let record = doc_comment(comment, 1);
    tree.set_start_line(function, record.line + record.text.matches('\n').count() + 1);
    (tree, function, vec![record])
}

fn run_checks(
    tree: &SourceTree,
    comments: &[CommentRecord],
    settings: &Settings,
    checks: &[BuiltinCheck],
) -> Collector {
    let mut collector = Collector::new();
    analyze_file(tree, &ScopeChain::new(), comments, settings, checks, &mut collector)
        .expect("check list is non-empty");
    collector
}

#[test]
fn missing_param_gets_one_diagnostic_and_an_insert_fix() {
    let source = "/**\n * @param foo\n */";
    let (tree, _, comments) = documented_function(
        source,
        vec![
            ParamPattern::Name("foo".to_owned()),
            ParamPattern::Name("bar".to_owned()),
        ],
    );
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::RequireParam],
    );

    assert_eq!(
        collector.messages(),
        vec!["Missing JSDoc @param \"bar\" declaration."]
    );

    // The fix inserts the synthesized entry directly after @param foo.
    let mut block = parse_comment(source);
    let fix = collector.violations[0].fix.clone().expect("insert fix");
    block.apply_edits(fix);
    assert_eq!(
        stringify_block(&block),
        "/**\n * @param foo\n * @param bar\n */"
    );
}

#[test]
fn missing_param_fix_is_idempotent() {
    let source = "/**\n * @param foo\n */";
    let (tree, _, comments) = documented_function(
        source,
        vec![
            ParamPattern::Name("foo".to_owned()),
            ParamPattern::Name("bar".to_owned()),
        ],
    );
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::RequireParam],
    );

    let mut block = parse_comment(source);
    block.apply_edits(collector.violations[0].fix.clone().expect("insert fix"));

    let fixed = stringify_block(&block);
    let (tree, _, comments) = documented_function(
        &fixed,
        vec![
            ParamPattern::Name("foo".to_owned()),
            ParamPattern::Name("bar".to_owned()),
        ],
    );
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::RequireParam],
    );
    assert!(collector.violations.is_empty());
}

#[test]
fn duplicate_param_reported_once_with_removal_fix() {
    let source = "/**\n * @param foo\n * @param foo\n */";
    let (tree, _, comments) = documented_function(
        source,
        vec![
            ParamPattern::Name("foo".to_owned()),
            ParamPattern::Name("bar".to_owned()),
        ],
    );
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::CheckParamNames],
    );

    assert_eq!(collector.messages(), vec!["Duplicate @param \"foo\""]);

    let mut block = parse_comment(source);
    block.apply_edits(collector.violations[0].fix.clone().expect("removal fix"));
    assert_eq!(block.tags_named("param").count(), 1);
}

#[test]
fn flat_doc_for_destructured_object_reported() {
    let (tree, _, comments) = documented_function(
        "/**\n * @param foo\n */",
        vec![ParamPattern::ObjectPattern {
            properties: vec!["foo".to_owned(), "bar".to_owned()],
        }],
    );
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::CheckParamNames],
    );
    assert_eq!(
        collector.messages(),
        vec![
            "@param \"foo\" declaration is not nested while its corresponding parameter is a destructured object."
        ]
    );
}

#[test]
fn undefined_type_reported_and_defined_type_marked_used() {
    let (tree, _, comments) = documented_function(
        "/**\n * @param {Foo} x\n */",
        vec![ParamPattern::Name("x".to_owned())],
    );
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::NoUndefinedTypes],
    );
    assert_eq!(collector.messages(), vec!["The type 'Foo' is undefined."]);

    // The same name bound in scope resolves, and the resolution is
    // surfaced as a used-variable side effect.
    let mut scopes = ScopeChain::new();
    scopes.bind(scopes.global(), "Foo");
    let mut collector = Collector::new();
    analyze_file(
        &tree,
        &scopes,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::NoUndefinedTypes],
        &mut collector,
    )
    .expect("check list is non-empty");
    assert!(collector.violations.is_empty());
    assert_eq!(collector.used_variables, vec!["Foo"]);
}

#[test]
fn typedef_in_same_file_defines_the_name() {
    let mut tree = SourceTree::new();
    let function = tree.add(tree.root(), NodeKind::FunctionDeclaration);
    tree.set_params(function, vec![ParamPattern::Name("x".to_owned())]);
    tree.set_start_line(function, 4);

    let comments = vec![
        doc_comment("/**\n * @param {Point} x\n */", 1),
        doc_comment("/**\n * @typedef {object} Point\n */", 8),
    ];
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::NoUndefinedTypes],
    );
    assert!(collector.violations.is_empty());
}

#[test]
fn returns_without_return_expression_reported() {
    let source = "/**\n * @returns {number}\n */";
    let mut tree = SourceTree::new();
    let function = tree.add(tree.root(), NodeKind::FunctionDeclaration);
    tree.set_start_line(function, 4);
    let body = tree.add(function, NodeKind::BlockStatement);
    tree.add(body, NodeKind::ReturnStatement { has_argument: false });

    let comments = vec![doc_comment(source, 1)];
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::RequireReturnsCheck],
    );
    assert_eq!(
        collector.messages(),
        vec!["JSDoc @returns declaration present but return expression not available in function."]
    );
}

#[test]
fn generator_yield_needs_explicit_opt_in() {
    let source = "/**\n * @returns {number}\n */";
    let mut tree = SourceTree::new();
    let function = tree.add(tree.root(), NodeKind::FunctionDeclaration);
    tree.set_generator(function, true);
    tree.set_start_line(function, 4);
    let body = tree.add(function, NodeKind::BlockStatement);
    tree.add(body, NodeKind::YieldExpression { has_argument: true });

    let comments = vec![doc_comment(source, 1)];

    // Without yield_as_return the yield does not count.
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::RequireReturnsCheck],
    );
    assert_eq!(collector.violations.len(), 1);

    let settings = Settings {
        yield_as_return: Some(YieldAsReturn::Argument),
        ..Settings::default()
    };
    let collector = run_checks(&tree, &comments, &settings, &[BuiltinCheck::RequireReturnsCheck]);
    assert!(collector.violations.is_empty());
}

#[test]
fn dotted_path_before_any_real_parameter_reported() {
    let (tree, _, comments) = documented_function(
        "/**\n * @param foo.bar\n */",
        vec![ParamPattern::Name("foo".to_owned())],
    );
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::CheckParamNames],
    );
    assert!(
        collector
            .messages()
            .iter()
            .any(|message| message
                == &"@param path declaration (\"foo.bar\") appears before any real parameter.")
    );
}

#[test]
fn param_order_mismatch_reports_both_lists() {
    let (tree, _, comments) = documented_function(
        "/**\n * @param b\n * @param a\n */",
        vec![
            ParamPattern::Name("a".to_owned()),
            ParamPattern::Name("b".to_owned()),
        ],
    );
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::CheckParamNames],
    );
    assert_eq!(
        collector.messages(),
        vec!["Expected @param names to be \"a, b\". Got \"b, a\"."]
    );
}

#[test]
fn private_type_bracket_is_dialect_sensitive() {
    let comments = vec![doc_comment("/**\n * @private {string}\n */", 1)];

    let jsdoc = Settings {
        dialect: Dialect::Jsdoc,
        ..Settings::default()
    };
    let mut collector = Collector::new();
    analyze_comments(&comments, &jsdoc, &[BuiltinCheck::ValidTypes], &mut collector)
        .expect("check list is non-empty");
    assert_eq!(
        collector.messages(),
        vec!["Types are not permitted on @private."]
    );

    let closure = Settings {
        dialect: Dialect::Closure,
        ..Settings::default()
    };
    let mut collector = Collector::new();
    analyze_comments(&comments, &closure, &[BuiltinCheck::ValidTypes], &mut collector)
        .expect("check list is non-empty");
    assert!(collector.violations.is_empty());
}

#[test]
fn inheritdoc_exempts_param_checks() {
    let (tree, _, comments) = documented_function(
        "/**\n * @inheritdoc\n */",
        vec![ParamPattern::Name("foo".to_owned())],
    );
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &[BuiltinCheck::RequireParam, BuiltinCheck::CheckParamNames],
    );
    assert!(collector.violations.is_empty());
}

#[test]
fn all_checks_run_clean_on_a_fully_documented_function() {
    let source = "/**\n * Sums a list.\n *\n * @param {Array<number>} values\n * @returns {number}\n */";
    let mut tree = SourceTree::new();
    let function = tree.add(tree.root(), NodeKind::FunctionDeclaration);
    tree.set_params(function, vec![ParamPattern::Name("values".to_owned())]);
    tree.set_start_line(function, 7);
    let body = tree.add(function, NodeKind::BlockStatement);
    tree.add(body, NodeKind::ReturnStatement { has_argument: true });

    let comments = vec![doc_comment(source, 1)];
    let collector = run_checks(
        &tree,
        &comments,
        &Settings::default(),
        &BuiltinCheck::ALL,
    );
    assert!(collector.violations.is_empty(), "{:?}", collector.messages());
}
