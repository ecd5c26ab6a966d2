//! Import-clause parsing for `@import` tags.
//!
//! An `@import` tag carries an ES import clause as its payload, e.g.
//! `{ Foo, Bar as Baz } from "./types.js"`. Only the bound local names
//! matter to analysis; the module specifier is kept for completeness.

use winnow::{
    ModalResult, Parser,
    ascii::multispace0,
    combinator::{alt, delimited, opt, preceded, separated},
    token::take_while,
};

/// The local names bound by one `@import` tag, plus its source module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBindings {
    pub names: Vec<String>,
    pub module: String,
}

/// Parse the payload of an `@import` tag.
///
/// Returns `None` for payloads that do not form a valid import clause;
/// a malformed tag contributes no names rather than failing analysis.
pub fn parse_import_bindings(payload: &str) -> Option<ImportBindings> {
    import_clause.parse(payload.trim()).ok()
}

fn ident(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |ch: char| {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
    })
    .verify(|name: &str| {
        !name.starts_with(|ch: char| ch.is_ascii_digit()) && name != "as" && name != "from"
    })
    .map(str::to_owned)
    .parse_next(input)
}

/// `name` or `name as alias`; the bound local name is the alias.
fn named_specifier(input: &mut &str) -> ModalResult<String> {
    let name = ident.parse_next(input)?;
    let alias = opt(preceded((multispace0, "as", multispace0), ident)).parse_next(input)?;
    Ok(alias.unwrap_or(name))
}

fn named_imports(input: &mut &str) -> ModalResult<Vec<String>> {
    delimited(
        ('{', multispace0),
        opt(separated(1.., named_specifier, (multispace0, ',', multispace0))),
        (multispace0, opt(','), multispace0, '}'),
    )
    .map(|names: Option<Vec<String>>| names.unwrap_or_default())
    .parse_next(input)
}

fn namespace_import(input: &mut &str) -> ModalResult<Vec<String>> {
    preceded(('*', multispace0, "as", multispace0), ident)
        .map(|name| vec![name])
        .parse_next(input)
}

fn module_specifier(input: &mut &str) -> ModalResult<String> {
    alt((
        delimited('"', take_while(0.., |ch: char| ch != '"'), '"'),
        delimited('\'', take_while(0.., |ch: char| ch != '\''), '\''),
    ))
    .map(str::to_owned)
    .parse_next(input)
}

fn import_clause(input: &mut &str) -> ModalResult<ImportBindings> {
    let mut names: Vec<String> = alt((
        named_imports,
        namespace_import,
        ident.map(|name| vec![name]),
    ))
    .parse_next(input)?;

    // `Default, { Named }` and `Default, * as NS` combinations.
    if names.len() == 1 {
        let extra: Option<Vec<String>> = opt(preceded(
            (multispace0, ',', multispace0),
            alt((named_imports, namespace_import)),
        ))
        .parse_next(input)?;
        if let Some(extra) = extra {
            names.extend(extra);
        }
    }

    let module = preceded((multispace0, "from", multispace0), module_specifier)
        .parse_next(input)?;
    Ok(ImportBindings { names, module })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(payload: &str) -> Vec<String> {
        parse_import_bindings(payload).map(|b| b.names).unwrap_or_default()
    }

    #[test]
    fn test_named_imports() {
        assert_eq!(names("{ Foo, Bar } from \"./types.js\""), vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_alias_binds_local_name() {
        assert_eq!(names("{ Foo as Local } from './a'"), vec!["Local"]);
    }

    #[test]
    fn test_default_import() {
        assert_eq!(names("Thing from 'pkg'"), vec!["Thing"]);
    }

    #[test]
    fn test_namespace_import() {
        assert_eq!(names("* as NS from 'pkg'"), vec!["NS"]);
    }

    #[test]
    fn test_default_plus_named() {
        assert_eq!(names("Thing, { Extra } from 'pkg'"), vec!["Thing", "Extra"]);
    }

    #[test]
    fn test_module_recorded() {
        let bindings = parse_import_bindings("{ A } from \"pkg\"").unwrap();
        assert_eq!(bindings.module, "pkg");
    }

    #[test]
    fn test_malformed_payload_yields_nothing() {
        assert!(parse_import_bindings("{ unterminated from 'pkg'").is_none());
        assert!(parse_import_bindings("").is_none());
        assert!(parse_import_bindings("{ A }").is_none());
    }

    #[test]
    fn test_trailing_comma_in_named_list() {
        assert_eq!(names("{ A, B, } from 'pkg'"), vec!["A", "B"]);
    }
}
