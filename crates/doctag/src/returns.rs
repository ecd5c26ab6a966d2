//! Return-reachability analysis for `@returns` checks.
//!
//! A tagged-variant matcher over the statement tree: each statement
//! category either yields a verdict (`return <expr>` found) or recurses
//! into its children. Nested function boundaries are never descended
//! into; a `return` inside a callback does not make the outer function
//! return. Unknown node kinds answer `false`.

use doctag_core::ast::{NodeId, NodeKind, SourceTree};

use crate::settings::{Settings, YieldAsReturn};

/// Whether a function-like node produces a return value for
/// documentation purposes.
///
/// `return;` without an argument never counts. Async functions count
/// (they return a promise) unless `ignore_async`. Expression-bodied
/// arrows always count. Generators count their yields only when
/// `yield_as_return` says so.
pub fn has_return_value(tree: &SourceTree, function: NodeId, settings: &Settings) -> bool {
    if !tree.kind(function).is_function_like() {
        return false;
    }
    if tree.is_async(function) && !settings.ignore_async {
        return true;
    }
    if tree.has_expression_body(function) {
        return true;
    }
    let generator = tree.is_generator(function);
    tree.children(function)
        .iter()
        .any(|child| statement_returns(tree, *child, generator, settings.yield_as_return))
}

fn statement_returns(
    tree: &SourceTree,
    node: NodeId,
    generator: bool,
    yield_as_return: Option<YieldAsReturn>,
) -> bool {
    match tree.kind(node) {
        NodeKind::ReturnStatement { has_argument } => has_argument,
        NodeKind::YieldExpression { has_argument } => {
            generator
                && match yield_as_return {
                    Some(YieldAsReturn::Always) => true,
                    Some(YieldAsReturn::Argument) => has_argument,
                    None => false,
                }
        }
        NodeKind::BlockStatement
        | NodeKind::IfStatement
        | NodeKind::SwitchStatement
        | NodeKind::SwitchCase
        | NodeKind::TryStatement
        | NodeKind::WithStatement
        | NodeKind::ExpressionStatement
        | NodeKind::LabeledStatement => descend(tree, node, generator, yield_as_return),
        kind if kind.is_loop() => descend(tree, node, generator, yield_as_return),
        // Function boundaries and everything unrecognized.
        _ => false,
    }
}

fn descend(
    tree: &SourceTree,
    node: NodeId,
    generator: bool,
    yield_as_return: Option<YieldAsReturn>,
) -> bool {
    tree.children(node)
        .iter()
        .any(|child| statement_returns(tree, *child, generator, yield_as_return))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function_with(body: impl FnOnce(&mut SourceTree, NodeId)) -> (SourceTree, NodeId) {
        let mut tree = SourceTree::new();
        let function = tree.add(tree.root(), NodeKind::FunctionDeclaration);
        body(&mut tree, function);
        (tree, function)
    }

    #[test]
    fn test_plain_return_with_argument() {
        let (tree, function) = function_with(|tree, function| {
            let block = tree.add(function, NodeKind::BlockStatement);
            tree.add(block, NodeKind::ReturnStatement { has_argument: true });
        });
        assert!(has_return_value(&tree, function, &Settings::default()));
    }

    #[test]
    fn test_bare_return_does_not_count() {
        let (tree, function) = function_with(|tree, function| {
            let block = tree.add(function, NodeKind::BlockStatement);
            tree.add(block, NodeKind::ReturnStatement { has_argument: false });
        });
        assert!(!has_return_value(&tree, function, &Settings::default()));
    }

    #[test]
    fn test_return_inside_conditional_found() {
        let (tree, function) = function_with(|tree, function| {
            let block = tree.add(function, NodeKind::BlockStatement);
            let branch = tree.add(block, NodeKind::IfStatement);
            let inner = tree.add(branch, NodeKind::BlockStatement);
            tree.add(inner, NodeKind::ReturnStatement { has_argument: true });
        });
        assert!(has_return_value(&tree, function, &Settings::default()));
    }

    #[test]
    fn test_nested_function_is_a_boundary() {
        let (tree, function) = function_with(|tree, function| {
            let block = tree.add(function, NodeKind::BlockStatement);
            let callback = tree.add(block, NodeKind::ArrowFunctionExpression);
            tree.add(callback, NodeKind::ReturnStatement { has_argument: true });
        });
        assert!(!has_return_value(&tree, function, &Settings::default()));
    }

    #[test]
    fn test_async_counts_unless_ignored() {
        let (mut tree, function) = function_with(|_, _| {});
        tree.set_async(function, true);
        assert!(has_return_value(&tree, function, &Settings::default()));

        let settings = Settings {
            ignore_async: true,
            ..Settings::default()
        };
        assert!(!has_return_value(&tree, function, &settings));
    }

    #[test]
    fn test_expression_bodied_arrow_counts() {
        let mut tree = SourceTree::new();
        let arrow = tree.add(tree.root(), NodeKind::ArrowFunctionExpression);
        tree.set_expression_body(arrow, true);
        assert!(has_return_value(&tree, arrow, &Settings::default()));
    }

    #[test]
    fn test_generator_yields_gated_by_setting() {
        let (mut tree, function) = function_with(|tree, function| {
            let block = tree.add(function, NodeKind::BlockStatement);
            let statement = tree.add(block, NodeKind::ExpressionStatement);
            tree.add(statement, NodeKind::YieldExpression { has_argument: false });
        });
        tree.set_generator(function, true);

        assert!(!has_return_value(&tree, function, &Settings::default()));

        let always = Settings {
            yield_as_return: Some(YieldAsReturn::Always),
            ..Settings::default()
        };
        assert!(has_return_value(&tree, function, &always));

        let argument = Settings {
            yield_as_return: Some(YieldAsReturn::Argument),
            ..Settings::default()
        };
        assert!(!has_return_value(&tree, function, &argument));
    }

    #[test]
    fn test_yield_with_argument() {
        let (mut tree, function) = function_with(|tree, function| {
            let block = tree.add(function, NodeKind::BlockStatement);
            let statement = tree.add(block, NodeKind::ExpressionStatement);
            tree.add(statement, NodeKind::YieldExpression { has_argument: true });
        });
        tree.set_generator(function, true);
        let argument = Settings {
            yield_as_return: Some(YieldAsReturn::Argument),
            ..Settings::default()
        };
        assert!(has_return_value(&tree, function, &argument));
    }

    #[test]
    fn test_return_inside_loop_found() {
        let (tree, function) = function_with(|tree, function| {
            let block = tree.add(function, NodeKind::BlockStatement);
            let while_loop = tree.add(block, NodeKind::WhileStatement);
            let inner = tree.add(while_loop, NodeKind::BlockStatement);
            tree.add(inner, NodeKind::ReturnStatement { has_argument: true });
        });
        assert!(has_return_value(&tree, function, &Settings::default()));
    }

    #[test]
    fn test_unknown_statement_kinds_answer_false() {
        let (tree, function) = function_with(|tree, function| {
            let block = tree.add(function, NodeKind::BlockStatement);
            tree.add(block, NodeKind::Other);
            tree.add(block, NodeKind::ThrowStatement);
        });
        assert!(!has_return_value(&tree, function, &Settings::default()));
    }

    #[test]
    fn test_non_function_node_answers_false() {
        let mut tree = SourceTree::new();
        let class = tree.add(tree.root(), NodeKind::ClassDeclaration);
        assert!(!has_return_value(&tree, class, &Settings::default()));
    }
}
