//! Type-expression grammar.
//!
//! Parses the contents of a tag's `{...}` bracket into a [`TypeExpr`]
//! tree. The grammar covers namepaths (`module:foo/bar~Baz`, `Foo#bar`),
//! unions, generic applications in both spellings (`Foo<T>` and
//! `Foo.<T>`), array shorthand `T[]`, the nullability and optionality
//! modifiers (`?T`, `!T`, `T=`), variadics, record types, function
//! types with `this`/`new` parameters, literals, and the `*`/`?`
//! wildcards.
//!
//! The tree exists to be walked for names; [`walk_names`] visits every
//! identifier leaf so callers can resolve them against a declared-name
//! universe.

use winnow::{
    ModalResult, Parser,
    ascii::{digit1, multispace0},
    combinator::{alt, delimited, opt, preceded, repeat, separated},
    token::take_while,
};

use crate::{error::TypeParseError, span::Span};

/// One node of a parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A namepath such as `string`, `Foo.Bar`, or `module:a/b~C`.
    Name(String),

    /// The `*` wildcard.
    Any,

    /// The bare `?` wildcard.
    Unknown,

    /// `A|B|...`, always with at least two arms.
    Union(Vec<TypeExpr>),

    /// A generic application, `Foo<T>` or `Foo.<T>`.
    Generic {
        name: String,
        applications: Vec<TypeExpr>,
    },

    /// Array shorthand, `T[]`.
    Array(Box<TypeExpr>),

    /// `?T`.
    Nullable(Box<TypeExpr>),

    /// `!T`.
    NonNullable(Box<TypeExpr>),

    /// `T=`.
    Optional(Box<TypeExpr>),

    /// `...T`, or a bare `...` with no inner type.
    Variadic(Option<Box<TypeExpr>>),

    /// `{key: T, bare}`.
    Record(Vec<(String, Option<TypeExpr>)>),

    /// `function(this: A, B): C`.
    Function {
        params: Vec<TypeExpr>,
        this_ty: Option<Box<TypeExpr>>,
        new_ty: Option<Box<TypeExpr>>,
        returns: Option<Box<TypeExpr>>,
    },

    /// `'text'` or `"text"`.
    StringLiteral(String),

    /// A numeric literal, kept verbatim.
    NumberLiteral(String),
}

/// Parse the contents of a type bracket.
pub fn parse_type(source: &str) -> Result<TypeExpr, TypeParseError> {
    delimited(multispace0, type_expr, multispace0)
        .parse(source)
        .map_err(|err| {
            let offset = err.offset().min(source.len());
            TypeParseError::new(
                Span::new(offset..source.len()),
                "expected a type expression",
            )
        })
}

/// Visit every identifier leaf of a type expression, outermost first.
pub fn walk_names<'a>(expr: &'a TypeExpr, visit: &mut impl FnMut(&'a str)) {
    match expr {
        TypeExpr::Name(name) => visit(name),
        TypeExpr::Generic { name, applications } => {
            visit(name);
            for application in applications {
                walk_names(application, visit);
            }
        }
        TypeExpr::Union(arms) => {
            for arm in arms {
                walk_names(arm, visit);
            }
        }
        TypeExpr::Array(inner)
        | TypeExpr::Nullable(inner)
        | TypeExpr::NonNullable(inner)
        | TypeExpr::Optional(inner) => walk_names(inner, visit),
        TypeExpr::Variadic(inner) => {
            if let Some(inner) = inner {
                walk_names(inner, visit);
            }
        }
        TypeExpr::Record(fields) => {
            for (_, value) in fields {
                if let Some(value) = value {
                    walk_names(value, visit);
                }
            }
        }
        TypeExpr::Function {
            params,
            this_ty,
            new_ty,
            returns,
        } => {
            for chained in [this_ty, new_ty] {
                if let Some(inner) = chained {
                    walk_names(inner, visit);
                }
            }
            for param in params {
                walk_names(param, visit);
            }
            if let Some(inner) = returns {
                walk_names(inner, visit);
            }
        }
        TypeExpr::Any
        | TypeExpr::Unknown
        | TypeExpr::StringLiteral(_)
        | TypeExpr::NumberLiteral(_) => {}
    }
}

/// All identifier leaves of a type expression, in visit order.
pub fn collect_names(expr: &TypeExpr) -> Vec<String> {
    let mut names = Vec::new();
    walk_names(expr, &mut |name| names.push(name.to_owned()));
    names
}

fn ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

fn type_expr(input: &mut &str) -> ModalResult<TypeExpr> {
    let mut arms: Vec<TypeExpr> =
        separated(1.., prefix_type, (multispace0, '|', multispace0)).parse_next(input)?;
    Ok(if arms.len() == 1 {
        arms.pop().unwrap()
    } else {
        TypeExpr::Union(arms)
    })
}

fn prefix_type(input: &mut &str) -> ModalResult<TypeExpr> {
    alt((
        preceded("...", opt(preceded(multispace0, prefix_type)))
            .map(|inner| TypeExpr::Variadic(inner.map(Box::new))),
        preceded(('!', multispace0), prefix_type)
            .map(|inner| TypeExpr::NonNullable(Box::new(inner))),
        preceded(('?', multispace0), postfix_type)
            .map(|inner| TypeExpr::Nullable(Box::new(inner))),
        postfix_type,
    ))
    .parse_next(input)
}

#[derive(Clone, Copy)]
enum Suffix {
    Array,
    Optional,
}

fn postfix_type(input: &mut &str) -> ModalResult<TypeExpr> {
    let mut expr = primary_type(input)?;
    let suffixes: Vec<Suffix> = repeat(
        0..,
        alt(("[]".value(Suffix::Array), '='.value(Suffix::Optional))),
    )
    .parse_next(input)?;
    for suffix in suffixes {
        expr = match suffix {
            Suffix::Array => TypeExpr::Array(Box::new(expr)),
            Suffix::Optional => TypeExpr::Optional(Box::new(expr)),
        };
    }
    Ok(expr)
}

fn primary_type(input: &mut &str) -> ModalResult<TypeExpr> {
    alt((
        function_type,
        record_type,
        delimited(('(', multispace0), type_expr, (multispace0, ')')),
        string_literal.map(TypeExpr::StringLiteral),
        number_literal,
        name_type,
        '*'.value(TypeExpr::Any),
        '?'.value(TypeExpr::Unknown),
    ))
    .parse_next(input)
}

/// A namepath: an identifier followed by separator-joined segments. A
/// separator is consumed only when an identifier segment follows, so
/// the `.` of `Foo.<T>` is left for the generic-application parser.
fn namepath(input: &mut &str) -> ModalResult<String> {
    let first: &str = take_while(1.., ident_char)
        .verify(|segment: &str| segment.starts_with(ident_start))
        .parse_next(input)?;
    let mut path = String::from(first);
    loop {
        let mut chars = input.chars();
        let (Some(separator), Some(next)) = (chars.next(), chars.next()) else {
            break;
        };
        if !matches!(separator, '.' | '#' | '~' | ':' | '/') || !ident_start(next) {
            break;
        }
        path.push(separator);
        *input = &input[separator.len_utf8()..];
        let segment: &str = take_while(1.., ident_char).parse_next(input)?;
        path.push_str(segment);
    }
    Ok(path)
}

fn name_type(input: &mut &str) -> ModalResult<TypeExpr> {
    let name = namepath(input)?;
    let applications: Option<Vec<TypeExpr>> = opt(delimited(
        (opt('.'), '<', multispace0),
        separated(1.., type_expr, (multispace0, ',', multispace0)),
        (multispace0, '>'),
    ))
    .parse_next(input)?;
    Ok(match applications {
        Some(applications) => TypeExpr::Generic { name, applications },
        None => TypeExpr::Name(name),
    })
}

fn record_field(input: &mut &str) -> ModalResult<(String, Option<TypeExpr>)> {
    let key = alt((
        take_while(1.., ident_char)
            .verify(|segment: &str| segment.starts_with(ident_start))
            .map(str::to_owned),
        string_literal,
        digit1.map(str::to_owned),
    ))
    .parse_next(input)?;
    let value = opt(preceded((multispace0, ':', multispace0), type_expr)).parse_next(input)?;
    Ok((key, value))
}

fn record_type(input: &mut &str) -> ModalResult<TypeExpr> {
    delimited(
        ('{', multispace0),
        opt(separated(
            1..,
            record_field,
            (multispace0, ',', multispace0),
        )),
        (multispace0, '}'),
    )
    .map(|fields: Option<Vec<_>>| TypeExpr::Record(fields.unwrap_or_default()))
    .parse_next(input)
}

enum FunctionParam {
    This(TypeExpr),
    New(TypeExpr),
    Plain(TypeExpr),
}

fn function_param(input: &mut &str) -> ModalResult<FunctionParam> {
    alt((
        preceded(("this", multispace0, ':', multispace0), type_expr).map(FunctionParam::This),
        preceded(("new", multispace0, ':', multispace0), type_expr).map(FunctionParam::New),
        type_expr.map(FunctionParam::Plain),
    ))
    .parse_next(input)
}

fn function_type(input: &mut &str) -> ModalResult<TypeExpr> {
    ("function", multispace0, '(', multispace0).parse_next(input)?;
    let raw: Option<Vec<FunctionParam>> = opt(separated(
        1..,
        function_param,
        (multispace0, ',', multispace0),
    ))
    .parse_next(input)?;
    (multispace0, ')').parse_next(input)?;
    let returns = opt(preceded((multispace0, ':', multispace0), type_expr)).parse_next(input)?;

    let mut params = Vec::new();
    let mut this_ty = None;
    let mut new_ty = None;
    for param in raw.unwrap_or_default() {
        match param {
            FunctionParam::This(inner) => this_ty = Some(Box::new(inner)),
            FunctionParam::New(inner) => new_ty = Some(Box::new(inner)),
            FunctionParam::Plain(inner) => params.push(inner),
        }
    }
    Ok(TypeExpr::Function {
        params,
        this_ty,
        new_ty,
        returns: returns.map(Box::new),
    })
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    alt((
        delimited('"', take_while(0.., |ch: char| ch != '"'), '"'),
        delimited('\'', take_while(0.., |ch: char| ch != '\''), '\''),
    ))
    .map(str::to_owned)
    .parse_next(input)
}

fn number_literal(input: &mut &str) -> ModalResult<TypeExpr> {
    (opt('-'), digit1, opt(('.', digit1)))
        .take()
        .map(|text: &str| TypeExpr::NumberLiteral(text.to_owned()))
        .parse_next(input)
}
