//! Per-dialect tag vocabularies: canonical names and their aliases.
//!
//! Each dialect recognizes a set of canonical tag names, some of which have
//! aliases (`@returns`/`@return`, `@augments`/`@extends`, ...). The tables
//! are layered: a common core shared by every dialect, plus per-dialect
//! additions and overrides. Closure notably inverts the `returns`/`return`
//! preference and drops `inheritdoc` (keeping the `inheritDoc` casing).
//!
//! Tables are built once per dialect behind a [`OnceLock`] and never
//! mutated afterwards, so unsynchronized concurrent reads are safe.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::dialect::Dialect;

/// A tag vocabulary: canonical name mapped to its aliases.
pub type AliasTable = IndexMap<&'static str, Vec<&'static str>>;

/// Tags shared by every dialect.
const COMMON: &[(&str, &[&str])] = &[
    ("abstract", &["virtual"]),
    ("access", &[]),
    ("alias", &[]),
    ("async", &[]),
    ("augments", &["extends"]),
    ("author", &[]),
    ("borrows", &[]),
    ("callback", &[]),
    ("class", &["constructor"]),
    ("classdesc", &[]),
    ("constructs", &[]),
    ("copyright", &[]),
    ("default", &["defaultvalue"]),
    ("deprecated", &[]),
    ("description", &["desc"]),
    ("enum", &[]),
    ("event", &[]),
    ("example", &[]),
    ("exports", &[]),
    ("external", &["host"]),
    ("file", &["fileoverview", "overview"]),
    ("fires", &["emits"]),
    ("function", &["func", "method"]),
    ("generator", &[]),
    ("global", &[]),
    ("hideconstructor", &[]),
    ("ignore", &[]),
    ("implements", &[]),
    ("inner", &[]),
    ("instance", &[]),
    ("interface", &[]),
    ("kind", &[]),
    ("lends", &[]),
    ("license", &[]),
    ("listens", &[]),
    ("member", &["var"]),
    ("mixes", &[]),
    ("mixin", &[]),
    ("module", &[]),
    ("name", &[]),
    ("namespace", &[]),
    ("override", &[]),
    ("package", &[]),
    ("param", &["arg", "argument"]),
    ("private", &[]),
    ("property", &["prop"]),
    ("protected", &[]),
    ("public", &[]),
    ("requires", &[]),
    ("returns", &["return"]),
    ("see", &[]),
    ("since", &[]),
    ("static", &[]),
    ("summary", &[]),
    ("this", &[]),
    ("throws", &["exception"]),
    ("todo", &[]),
    ("tutorial", &[]),
    ("type", &[]),
    ("typedef", &[]),
    ("variation", &[]),
    ("version", &[]),
];

/// Present in JSDoc but absent from its published documentation.
const JSDOC_UNDOCUMENTED: &[(&str, &[&str])] = &[("modifies", &[])];

/// JSDoc-only additions on top of the common core.
const JSDOC_EXTRA: &[(&str, &[&str])] = &[
    ("constant", &["const"]),
    ("inheritdoc", &[]),
    // Casing distinct from the lowercase form; required by Closure.
    ("inheritDoc", &[]),
    ("memberof", &[]),
    ("memberof!", &[]),
    ("readonly", &[]),
    ("yields", &["yield"]),
];

/// TypeScript-only additions on top of the common core.
const TYPESCRIPT_EXTRA: &[(&str, &[&str])] = &[("template", &[]), ("import", &[])];

/// Closure tags present in the compiler source but not its documentation.
const CLOSURE_UNDOCUMENTED: &[(&str, &[&str])] = &[
    ("closurePrimitive", &[]),
    ("customElement", &[]),
    ("expose", &[]),
    ("hidden", &[]),
    ("idGenerator", &[]),
    ("meaning", &[]),
    ("mixinClass", &[]),
    ("mixinFunction", &[]),
    ("ngInject", &[]),
    ("owner", &[]),
    ("typeSummary", &[]),
    ("wizaction", &[]),
];

/// Documented Closure additions.
const CLOSURE_EXTRA: &[(&str, &[&str])] = &[
    ("define", &[]),
    ("dict", &[]),
    ("export", &[]),
    ("externs", &[]),
    ("final", &[]),
    ("implicitCast", &[]),
    ("noalias", &[]),
    ("nocollapse", &[]),
    ("nocompile", &[]),
    ("noinline", &[]),
    ("nosideeffects", &[]),
    ("polymer", &[]),
    ("polymerBehavior", &[]),
    ("preserve", &[]),
    ("record", &[]),
    // Closure inverts the preference: `return` is canonical.
    ("return", &["returns"]),
    ("struct", &[]),
    ("suppress", &[]),
    ("unrestricted", &[]),
];

fn extend(table: &mut AliasTable, entries: &[(&'static str, &[&'static str])]) {
    for (name, aliases) in entries {
        table.insert(*name, aliases.to_vec());
    }
}

fn build_jsdoc() -> AliasTable {
    let mut table = AliasTable::new();
    extend(&mut table, COMMON);
    extend(&mut table, JSDOC_UNDOCUMENTED);
    extend(&mut table, JSDOC_EXTRA);
    table
}

fn build_typescript() -> AliasTable {
    let mut table = AliasTable::new();
    extend(&mut table, COMMON);
    extend(&mut table, TYPESCRIPT_EXTRA);
    table
}

fn build_closure() -> AliasTable {
    // TypeScript layered under JSDoc, with `inheritdoc` and the
    // `returns` canonical entry removed before the Closure overrides.
    let mut table = build_typescript();
    for (name, aliases) in build_jsdoc() {
        table.insert(name, aliases);
    }
    table.shift_remove("inheritdoc");
    table.shift_remove("returns");
    extend(&mut table, CLOSURE_UNDOCUMENTED);
    extend(&mut table, CLOSURE_EXTRA);
    table
}

fn build_permissive() -> AliasTable {
    let mut table = build_closure();
    for (name, aliases) in build_jsdoc().into_iter().chain(build_typescript()) {
        table.entry(name).or_insert(aliases);
    }
    table
}

/// The alias table for a dialect.
///
/// Built on first use and cached for the process lifetime.
pub fn alias_table(dialect: Dialect) -> &'static AliasTable {
    static JSDOC: OnceLock<AliasTable> = OnceLock::new();
    static TYPESCRIPT: OnceLock<AliasTable> = OnceLock::new();
    static CLOSURE: OnceLock<AliasTable> = OnceLock::new();
    static PERMISSIVE: OnceLock<AliasTable> = OnceLock::new();

    match dialect {
        Dialect::Jsdoc => JSDOC.get_or_init(build_jsdoc),
        Dialect::Typescript => TYPESCRIPT.get_or_init(build_typescript),
        Dialect::Closure => CLOSURE.get_or_init(build_closure),
        Dialect::Permissive => PERMISSIVE.get_or_init(build_permissive),
    }
}

/// The canonical name for `name` under `dialect`: either `name` itself if
/// it is canonical, or the canonical entry that lists it as an alias.
pub fn canonical_name(dialect: Dialect, name: &str) -> Option<&'static str> {
    let table = alias_table(dialect);
    if let Some((canonical, _)) = table.get_key_value(name) {
        return Some(canonical);
    }
    table
        .iter()
        .find(|(_, aliases)| aliases.contains(&name))
        .map(|(canonical, _)| *canonical)
}

/// Whether `name` is known to the dialect, either as a canonical tag name
/// or as an alias.
pub fn is_known_tag(dialect: Dialect, name: &str) -> bool {
    canonical_name(dialect, name).is_some()
}
