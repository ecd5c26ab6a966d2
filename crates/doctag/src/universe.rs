//! The identifier universe: every name considered defined in one file.
//!
//! Built fresh per file visit as a plain string set; the sole query is
//! membership. The union is assembled from the primitive list, scope
//! bindings (global plus top-level module bindings only), names hoisted
//! file-wide by namepath-defining tags, Typescript `@import` payloads,
//! and configured extra names. Template names are declaration-local
//! (harvested from ancestor blocks) and are added on top of a clone of
//! the file universe by the iteration driver.

use std::collections::BTreeSet;

use doctag_core::{
    block::ParsedCommentBlock,
    dialect::Dialect,
    queries,
    scope::ScopeChain,
};
use doctag_parser::parse_import_bindings;

use crate::settings::Settings;

/// Names defined by the language itself, valid in any dialect.
pub const PRIMITIVE_NAMES: &[&str] = &[
    "null", "undefined", "void", "string", "boolean", "object", "function", "symbol", "number",
    "bigint", "NaN", "Infinity", "any", "*", "never", "unknown", "const", "this", "true", "false",
    "Array", "Object", "RegExp", "Date", "Function",
];

/// Utility-type names defined only under the Typescript dialect.
pub const TYPESCRIPT_GLOBALS: &[&str] = &[
    "Awaited",
    "Partial",
    "Required",
    "Readonly",
    "Record",
    "Pick",
    "Omit",
    "Exclude",
    "Extract",
    "NonNullable",
    "Parameters",
    "ConstructorParameters",
    "ReturnType",
    "InstanceType",
    "ThisParameterType",
    "OmitThisParameter",
    "ThisType",
    "Uppercase",
    "Lowercase",
    "Capitalize",
    "Uncapitalize",
];

/// Whether a name is on the fixed primitive list.
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_NAMES.contains(&name)
}

/// Strip a trailing pseudo-type suffix (`.`, `<>`, `.<>`, `[]`) from a
/// configured type name.
pub fn strip_pseudo_types(name: &str) -> &str {
    for suffix in [".<>", "<>", "[]"] {
        if let Some(stripped) = name.strip_suffix(suffix) {
            return stripped;
        }
    }
    name.strip_suffix('.').unwrap_or(name)
}

/// The set of names considered defined for one file.
#[derive(Debug, Clone, Default)]
pub struct IdentifierUniverse {
    names: BTreeSet<String>,
}

impl IdentifierUniverse {
    pub fn new() -> Self {
        IdentifierUniverse::default()
    }

    /// Membership test; case-sensitive.
    pub fn has(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Insert a name; duplicates collapse silently.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Build the file-wide identifier universe.
///
/// `blocks` is every parsed doc block in the file, in document order;
/// namepath-defining tag names are hoisted from all of them, so a
/// typedef declared after its use still resolves.
pub fn build_universe(
    scopes: &ScopeChain,
    blocks: &[ParsedCommentBlock],
    settings: &Settings,
) -> IdentifierUniverse {
    let mut universe = IdentifierUniverse::new();
    let dialect = settings.dialect;

    for name in PRIMITIVE_NAMES {
        universe.insert(*name);
    }
    if dialect == Dialect::Typescript {
        for name in TYPESCRIPT_GLOBALS {
            universe.insert(*name);
        }
    }

    // Every binding visible from the module scope (or the global scope
    // alone for script files). Function-local bindings are excluded;
    // the target is declaration-level typos, not deep-local ones.
    let top = scopes.module_scope().unwrap_or_else(|| scopes.global());
    for name in scopes.names_from(top) {
        universe.insert(name);
    }

    for block in blocks {
        for tag in &block.tags {
            if queries::is_namepath_defining(dialect, &tag.tag) && !tag.name.is_empty() {
                universe.insert(tag.name.clone());
            }
            if dialect == Dialect::Typescript && tag.tag == "import" {
                if let Some(bindings) = parse_import_bindings(&import_payload(tag)) {
                    for name in bindings.names {
                        universe.insert(name);
                    }
                }
            }
        }
    }

    for name in &settings.defined_types {
        universe.insert(strip_pseudo_types(name));
    }
    for preference in settings.preferred_types.values() {
        if let Some(replacement) = preference.replacement() {
            universe.insert(strip_pseudo_types(replacement));
        }
    }

    universe
}

/// Reassemble an `@import` tag's payload from its tokenized fields.
///
/// The tokenizer splits `@import { A } from 'mod'` into a type bracket
/// and a name/description remainder; the import-clause parser wants the
/// original clause text.
fn import_payload(tag: &doctag_core::block::ParsedTagRecord) -> String {
    let mut payload = String::new();
    if !tag.type_text.is_empty() {
        payload.push('{');
        payload.push_str(&tag.type_text);
        payload.push('}');
    }
    for part in [tag.name.as_str(), tag.description.as_str()] {
        if !part.is_empty() {
            if !payload.is_empty() {
                payload.push(' ');
            }
            payload.push_str(part);
        }
    }
    payload
}

/// Add template/generic names harvested from one doc block.
///
/// Under Closure a template payload is a comma-separated name list;
/// other dialects take the name token alone.
pub fn add_template_names(
    universe: &mut IdentifierUniverse,
    block: &ParsedCommentBlock,
    dialect: Dialect,
) {
    for tag in block.tags_named("template") {
        if dialect == Dialect::Closure {
            let mut payload = tag.name.clone();
            if !tag.description.is_empty() {
                payload.push(' ');
                payload.push_str(&tag.description);
            }
            for name in payload.split(',') {
                let name = name.trim();
                if !name.is_empty() {
                    universe.insert(name);
                }
            }
        } else if !tag.name.is_empty() {
            universe.insert(tag.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctag_core::{block::ParsedTagRecord, scope::ScopeKind};

    fn block_with(tags: Vec<ParsedTagRecord>) -> ParsedCommentBlock {
        ParsedCommentBlock {
            tags,
            ..ParsedCommentBlock::default()
        }
    }

    fn tag(name: &str, payload: &str) -> ParsedTagRecord {
        ParsedTagRecord::synthesized(name, payload)
    }

    #[test]
    fn test_primitives_always_present() {
        let universe = build_universe(&ScopeChain::new(), &[], &Settings::default());
        assert!(universe.has("string"));
        assert!(universe.has("NaN"));
        assert!(!universe.has("Partial"));
    }

    #[test]
    fn test_typescript_globals_gated_by_dialect() {
        let settings = Settings {
            dialect: Dialect::Typescript,
            ..Settings::default()
        };
        let universe = build_universe(&ScopeChain::new(), &[], &settings);
        assert!(universe.has("Partial"));
        assert!(universe.has("ReturnType"));
    }

    #[test]
    fn test_scope_bindings_global_and_module_only() {
        let mut scopes = ScopeChain::new();
        scopes.bind(scopes.global(), "GlobalThing");
        let module = scopes.push(scopes.global(), ScopeKind::Module);
        scopes.bind(module, "ModuleThing");
        let function = scopes.push(module, ScopeKind::Function);
        scopes.bind(function, "localThing");

        let universe = build_universe(&scopes, &[], &Settings::default());
        assert!(universe.has("GlobalThing"));
        assert!(universe.has("ModuleThing"));
        assert!(!universe.has("localThing"));
    }

    #[test]
    fn test_typedef_hoisted_file_wide() {
        let blocks = vec![block_with(vec![tag("typedef", "LateType")])];
        let universe = build_universe(&ScopeChain::new(), &blocks, &Settings::default());
        assert!(universe.has("LateType"));
    }

    #[test]
    fn test_import_tag_typescript_only() {
        let mut import = tag("import", "from");
        import.type_text = " Foo, Bar ".to_owned();
        import.description = "'./types.js'".to_owned();
        let blocks = vec![block_with(vec![import])];

        let jsdoc = build_universe(&ScopeChain::new(), &blocks, &Settings::default());
        assert!(!jsdoc.has("Foo"));

        let settings = Settings {
            dialect: Dialect::Typescript,
            ..Settings::default()
        };
        let typescript = build_universe(&ScopeChain::new(), &blocks, &settings);
        assert!(typescript.has("Foo"));
        assert!(typescript.has("Bar"));
    }

    #[test]
    fn test_configured_names_with_pseudo_type_stripping() {
        let mut settings = Settings::default();
        settings.defined_types.push("MyList[]".to_owned());
        settings.preferred_types.insert(
            "object".to_owned(),
            crate::settings::TypePreference::Replacement("PlainObject.<>".to_owned()),
        );
        let universe = build_universe(&ScopeChain::new(), &[], &settings);
        assert!(universe.has("MyList"));
        assert!(universe.has("PlainObject"));
    }

    #[test]
    fn test_template_names_closure_comma_split() {
        let mut template = tag("template", "K,");
        template.description = "V".to_owned();
        let block = block_with(vec![template]);

        let mut closure = IdentifierUniverse::new();
        add_template_names(&mut closure, &block, Dialect::Closure);
        assert!(closure.has("K"));
        assert!(closure.has("V"));

        let mut jsdoc = IdentifierUniverse::new();
        add_template_names(&mut jsdoc, &block_with(vec![tag("template", "T")]), Dialect::Jsdoc);
        assert!(jsdoc.has("T"));
        add_template_names(&mut jsdoc, &block, Dialect::Jsdoc);
        assert!(!jsdoc.has("V"));
    }

    #[test]
    fn test_strip_pseudo_types() {
        assert_eq!(strip_pseudo_types("Foo."), "Foo");
        assert_eq!(strip_pseudo_types("Foo<>"), "Foo");
        assert_eq!(strip_pseudo_types("Foo.<>"), "Foo");
        assert_eq!(strip_pseudo_types("Foo[]"), "Foo");
        assert_eq!(strip_pseudo_types("Foo"), "Foo");
    }
}
