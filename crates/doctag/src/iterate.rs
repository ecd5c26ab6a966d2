//! Per-declaration iteration over doc blocks.
//!
//! Two driving modes share the [`DocContext`] utilities bundle:
//! attached mode walks eligible declaration nodes and visits the doc
//! block sitting immediately above each one; all-comments mode visits
//! every doc-sentinel comment in the file regardless of attachment,
//! with the node-dependent utilities degraded to `None`.
//!
//! Blocks are parsed fresh for every visit and owned by the context;
//! nothing is cached across declarations or files.

use doctag_core::{
    ast::{CommentRecord, NodeId, NodeKind, ParamPattern, SourceTree},
    block::ParsedCommentBlock,
    scope::ScopeChain,
};
use doctag_parser::parse_comment;

use crate::{
    report::Reporter,
    settings::Settings,
    universe::{IdentifierUniverse, add_template_names, build_universe},
};

/// The utilities bundle handed to each check invocation.
///
/// An explicit struct with no hidden captures: everything a check can
/// ask about the current declaration lives in these fields.
pub struct DocContext<'a> {
    /// The declaration the block is attached to; `None` in all-comments
    /// mode.
    pub node: Option<NodeId>,

    /// The syntax tree, when a node is available.
    pub tree: Option<&'a SourceTree>,

    /// The parsed doc block, owned by this visit.
    pub block: ParsedCommentBlock,

    /// 1-based source line of the block opener.
    pub comment_line: usize,

    /// The identifier universe for this declaration: the file universe
    /// plus template names from the block chain.
    pub universe: IdentifierUniverse,

    /// Active settings.
    pub settings: &'a Settings,
}

impl DocContext<'_> {
    /// The function node the block documents: the node itself, or the
    /// function expression inside a method definition.
    pub fn function_node(&self) -> Option<NodeId> {
        let (tree, node) = (self.tree?, self.node?);
        if tree.kind(node).is_function_like() {
            return Some(node);
        }
        if tree.kind(node) == NodeKind::MethodDefinition {
            return tree
                .children(node)
                .iter()
                .copied()
                .find(|child| tree.kind(*child).is_function_like());
        }
        None
    }

    /// The documented function's formal parameters, empty without one.
    pub fn params(&self) -> &[ParamPattern] {
        match (self.tree, self.function_node()) {
            (Some(tree), Some(function)) => tree.params(function),
            _ => &[],
        }
    }
}

/// Whether a node kind participates in attached-mode iteration.
///
/// A non-empty `contexts` list replaces the default set with an exact
/// kind-name match.
fn is_eligible(kind: NodeKind, contexts: &[String]) -> bool {
    if !contexts.is_empty() {
        return contexts.iter().any(|context| context == kind.name());
    }
    kind.is_function_like()
        || matches!(
            kind,
            NodeKind::ClassDeclaration | NodeKind::ClassExpression | NodeKind::MethodDefinition
        )
}

/// A doc comment plus its parsed position bounds.
struct DocComment<'a> {
    record: &'a CommentRecord,
    end_line: usize,
}

/// Rebuild the full comment source (`/** ... */`) from a record's
/// payload and parse it.
fn parse_record(record: &CommentRecord) -> ParsedCommentBlock {
    parse_comment(&format!("/*{}*/", record.text))
}

fn doc_comments(comments: &[CommentRecord]) -> Vec<DocComment<'_>> {
    comments
        .iter()
        .filter(|record| record.is_doc_block())
        .map(|record| DocComment {
            record,
            end_line: record.line + record.text.matches('\n').count(),
        })
        .collect()
}

/// The doc comment ending on the line directly above `line`, if any.
fn attached_to<'a>(docs: &'a [DocComment<'a>], line: usize) -> Option<&'a DocComment<'a>> {
    docs.iter().find(|doc| doc.end_line + 1 == line)
}

/// Attached mode: visit each eligible declaration that has a doc block
/// directly above it.
///
/// The file universe is built once from every doc block in the file;
/// each visit gets a copy extended with template names harvested from
/// the declaration's own block and the blocks of its lexical ancestors.
pub fn iterate_attached<F>(
    tree: &SourceTree,
    scopes: &ScopeChain,
    comments: &[CommentRecord],
    settings: &Settings,
    reporter: &mut dyn Reporter,
    mut visit: F,
) where
    F: FnMut(&mut DocContext<'_>, &mut dyn Reporter),
{
    let docs = doc_comments(comments);
    let parsed: Vec<ParsedCommentBlock> = docs.iter().map(|doc| parse_record(doc.record)).collect();
    let file_universe = build_universe(scopes, &parsed, settings);

    for node in tree.iter_ids() {
        if !is_eligible(tree.kind(node), &settings.contexts) {
            continue;
        }
        let Some(doc) = attached_to(&docs, tree.start_line(node)) else {
            continue;
        };

        let block = parse_record(doc.record);
        let mut universe = file_universe.clone();
        add_template_names(&mut universe, &block, settings.dialect);
        for ancestor in tree.ancestors(node) {
            if let Some(ancestor_doc) = attached_to(&docs, tree.start_line(ancestor)) {
                let ancestor_block = parse_record(ancestor_doc.record);
                add_template_names(&mut universe, &ancestor_block, settings.dialect);
            }
        }

        let mut context = DocContext {
            node: Some(node),
            tree: Some(tree),
            block,
            comment_line: doc.record.line,
            universe,
            settings,
        };
        visit(&mut context, reporter);
    }
}

/// All-comments mode: visit every doc-sentinel comment irrespective of
/// attachment. Node-dependent utilities degrade to `None`.
pub fn iterate_all_comments<F>(
    comments: &[CommentRecord],
    settings: &Settings,
    reporter: &mut dyn Reporter,
    mut visit: F,
) where
    F: FnMut(&mut DocContext<'_>, &mut dyn Reporter),
{
    let docs = doc_comments(comments);
    let parsed: Vec<ParsedCommentBlock> = docs.iter().map(|doc| parse_record(doc.record)).collect();
    let scopes = ScopeChain::new();
    let file_universe = build_universe(&scopes, &parsed, settings);

    for doc in &docs {
        let block = parse_record(doc.record);
        let mut universe = file_universe.clone();
        add_template_names(&mut universe, &block, settings.dialect);

        let mut context = DocContext {
            node: None,
            tree: None,
            block,
            comment_line: doc.record.line,
            universe,
            settings,
        };
        visit(&mut context, reporter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Collector;

    fn comment(text: &str, line: usize) -> CommentRecord {
        CommentRecord {
            text: text.to_owned(),
            line,
            column: 0,
            block_style: true,
        }
    }

    #[test]
    fn test_attached_visits_documented_functions_only() {
        let mut tree = SourceTree::new();
        let documented = tree.add(tree.root(), NodeKind::FunctionDeclaration);
        tree.set_start_line(documented, 4);
        let undocumented = tree.add(tree.root(), NodeKind::FunctionDeclaration);
        tree.set_start_line(undocumented, 10);

        let comments = vec![comment("*\n * Adds.\n ", 1)];
        let mut collector = Collector::new();
        let mut visited = Vec::new();
        iterate_attached(
            &tree,
            &ScopeChain::new(),
            &comments,
            &Settings::default(),
            &mut collector,
            |context, _| visited.push(context.node),
        );
        assert_eq!(visited, vec![Some(documented)]);
    }

    #[test]
    fn test_attachment_requires_adjacency() {
        let mut tree = SourceTree::new();
        let function = tree.add(tree.root(), NodeKind::FunctionDeclaration);
        tree.set_start_line(function, 8);

        // Block ends on line 3; the function starts on line 8.
        let comments = vec![comment("*\n * Stale.\n ", 1)];
        let mut collector = Collector::new();
        let mut visits = 0;
        iterate_attached(
            &tree,
            &ScopeChain::new(),
            &comments,
            &Settings::default(),
            &mut collector,
            |_, _| visits += 1,
        );
        assert_eq!(visits, 0);
    }

    #[test]
    fn test_contexts_override_default_eligibility() {
        let mut tree = SourceTree::new();
        let class = tree.add(tree.root(), NodeKind::ClassDeclaration);
        tree.set_start_line(class, 4);
        let function = tree.add(tree.root(), NodeKind::FunctionDeclaration);
        tree.set_start_line(function, 10);

        let comments = vec![
            comment("*\n * A class.\n ", 1),
            comment("*\n * A function.\n ", 7),
        ];
        let settings = Settings {
            contexts: vec!["ClassDeclaration".to_owned()],
            ..Settings::default()
        };
        let mut collector = Collector::new();
        let mut visited = Vec::new();
        iterate_attached(
            &tree,
            &ScopeChain::new(),
            &comments,
            &settings,
            &mut collector,
            |context, _| visited.push(context.node),
        );
        assert_eq!(visited, vec![Some(class)]);
    }

    #[test]
    fn test_method_definition_resolves_inner_function_params() {
        let mut tree = SourceTree::new();
        let class = tree.add(tree.root(), NodeKind::ClassDeclaration);
        let method = tree.add(class, NodeKind::MethodDefinition);
        tree.set_start_line(method, 4);
        let function = tree.add(method, NodeKind::FunctionExpression);
        tree.set_params(function, vec![ParamPattern::Name("value".to_owned())]);

        let comments = vec![comment("*\n * Sets.\n ", 1)];
        let mut collector = Collector::new();
        let mut seen_params = Vec::new();
        iterate_attached(
            &tree,
            &ScopeChain::new(),
            &comments,
            &Settings::default(),
            &mut collector,
            |context, _| {
                seen_params = context.params().to_vec();
            },
        );
        assert_eq!(seen_params, vec![ParamPattern::Name("value".to_owned())]);
    }

    #[test]
    fn test_ancestor_template_names_visible() {
        let mut tree = SourceTree::new();
        let class = tree.add(tree.root(), NodeKind::ClassDeclaration);
        tree.set_start_line(class, 4);
        let method = tree.add(class, NodeKind::MethodDefinition);
        tree.set_start_line(method, 9);
        tree.add(method, NodeKind::FunctionExpression);

        let comments = vec![
            comment("*\n * @template T\n ", 1),
            comment("*\n * @param {T} value\n ", 6),
        ];
        let mut collector = Collector::new();
        let mut resolved = false;
        iterate_attached(
            &tree,
            &ScopeChain::new(),
            &comments,
            &Settings::default(),
            &mut collector,
            |context, _| {
                if context.node.map(|node| node == method).unwrap_or(false) {
                    resolved = context.universe.has("T");
                }
            },
        );
        assert!(resolved);
    }

    #[test]
    fn test_all_comments_mode_visits_every_doc_block() {
        let comments = vec![
            comment("*\n * One.\n ", 1),
            comment(" not a doc block ", 5),
            comment("*\n * Two.\n ", 8),
        ];
        let mut collector = Collector::new();
        let mut descriptions = Vec::new();
        iterate_all_comments(
            &comments,
            &Settings::default(),
            &mut collector,
            |context, _| {
                assert!(context.node.is_none());
                assert!(context.params().is_empty());
                descriptions.push(context.block.description.clone());
            },
        );
        assert_eq!(descriptions, vec!["One.", "Two."]);
    }
}
