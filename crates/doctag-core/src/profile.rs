//! Structural profiles for tags: what a tag's name payload means, whether
//! it carries a type expression, and where it may legally appear.
//!
//! The profile table is the single source of truth the classification
//! queries in [`queries`](crate::queries) are answered from. One immutable
//! table exists per [`Dialect`], built at first use and never mutated at
//! analysis time; queries are pure lookups with layered fallback
//! (dialect-conditioned entry, then the maximally permissive profile for
//! unknown tags).

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::{ast::NodeKind, dialect::Dialect};

/// What a tag's name payload contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameContents {
    /// The name introduces a new resolvable identifier (`@typedef`,
    /// `@callback`, ...).
    NamepathDefining,

    /// The name must resolve to an already-known identifier (`@alias`,
    /// `@memberof`, ...).
    NamepathReferencing,

    /// Free text with no namepath semantics (`@see` by default).
    Text,

    /// The tag takes no meaningful name payload.
    #[default]
    Disallowed,
}

impl NameContents {
    /// Whether the name payload participates in namepath resolution.
    pub fn is_namepath(&self) -> bool {
        matches!(
            self,
            NameContents::NamepathDefining | NameContents::NamepathReferencing
        )
    }
}

/// Structural predicate over a tag's attachment site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSelector {
    /// Any function-like declaration or expression.
    Function,

    /// Any top-level statement.
    TopLevel,

    /// A class declaration.
    ClassDeclaration,

    /// A class expression.
    ClassExpression,

    /// A `const` variable declaration.
    ConstDeclaration,

    /// A top-level statement, but only when one of the listed tags is
    /// also present in the same block (`@implements` on `@callback`s).
    TopLevelWithTags(&'static [&'static str]),
}

impl ContextSelector {
    /// Whether the selector accepts a declaration of the given kind.
    ///
    /// `top_level` reports whether the declaration is a direct child of the
    /// file root; `block_tags` lists the tag names present in the same
    /// comment block (for the co-tag-conditioned selector).
    pub fn matches(&self, kind: &NodeKind, top_level: bool, block_tags: &[&str]) -> bool {
        match self {
            ContextSelector::Function => kind.is_function_like(),
            ContextSelector::TopLevel => top_level,
            ContextSelector::ClassDeclaration => matches!(kind, NodeKind::ClassDeclaration),
            ContextSelector::ClassExpression => matches!(kind, NodeKind::ClassExpression),
            ContextSelector::ConstDeclaration => {
                matches!(kind, NodeKind::VariableDeclaration { constant: true })
            }
            ContextSelector::TopLevelWithTags(required) => {
                top_level && required.iter().any(|tag| block_tags.contains(tag))
            }
        }
    }
}

/// The structural profile of one tag under one dialect.
///
/// Invariant: `type_required` implies `type_allowed`;
/// `type_or_name_required` is satisfiable by either a type or a name,
/// independent of the individual required flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagProfile {
    /// What the name payload contains.
    pub name_contents: NameContents,

    /// Whether a `{type}` bracket may appear.
    pub type_allowed: bool,

    /// Whether a `{type}` bracket must appear.
    pub type_required: bool,

    /// Whether a name payload must appear.
    pub name_required: bool,

    /// Whether at least one of type or name must appear.
    pub type_or_name_required: bool,

    /// Syntactic contexts the tag is allowed in; empty means anywhere.
    pub contexts: Vec<ContextSelector>,

    /// Tags that may not co-occur with this one in the same block.
    pub disallowed_cotags: Vec<&'static str>,
}

impl TagProfile {
    /// The profile applied to tags absent from the table: maximally
    /// permissive, with no structural requirements.
    pub fn permissive() -> Self {
        TagProfile {
            name_contents: NameContents::Text,
            type_allowed: true,
            ..TagProfile::default()
        }
    }
}

/// Per-dialect profile table.
pub type ProfileTable = IndexMap<&'static str, TagProfile>;

use ContextSelector::{
    ClassDeclaration as InClassDecl, ClassExpression as InClassExpr,
    ConstDeclaration as InConstDecl, Function as InFunction, TopLevel as AtTopLevel,
};

fn build_profiles(dialect: Dialect) -> ProfileTable {
    let is_jsdoc = dialect == Dialect::Jsdoc;
    let is_closure = dialect == Dialect::Closure;
    let is_typescript = dialect == Dialect::Typescript;
    let is_permissive = dialect == Dialect::Permissive;

    let is_jsdoc_or_typescript = is_jsdoc || is_typescript;
    let is_typescript_or_closure = is_typescript || is_closure;
    let is_closure_or_permissive = is_closure || is_permissive;
    let is_jsdoc_typescript_or_permissive = is_jsdoc_or_typescript || is_permissive;

    let defining = |profile: TagProfile| TagProfile {
        name_contents: NameContents::NamepathDefining,
        ..profile
    };
    let referencing = |profile: TagProfile| TagProfile {
        name_contents: NameContents::NamepathReferencing,
        ..profile
    };

    let mut table = ProfileTable::new();
    let mut set = |name: &'static str, profile: TagProfile| {
        table.insert(name, profile);
    };

    set(
        "alias",
        referencing(TagProfile {
            type_or_name_required: true,
            ..TagProfile::default()
        }),
    );

    for name in ["arg", "argument", "param"] {
        set(
            name,
            defining(TagProfile {
                name_required: true,
                type_allowed: true,
                contexts: vec![InFunction, AtTopLevel],
                ..TagProfile::default()
            }),
        );
    }

    set(
        "augments",
        referencing(TagProfile {
            type_allowed: true,
            type_or_name_required: true,
            ..TagProfile::default()
        }),
    );

    set(
        "author",
        TagProfile {
            contexts: vec![AtTopLevel],
            ..TagProfile::default()
        },
    );

    set(
        "async",
        TagProfile {
            contexts: vec![InFunction, AtTopLevel],
            ..TagProfile::default()
        },
    );

    // `borrows` has its own `<namepath> as <namepath>` format; both sides
    // are namepaths.
    set(
        "borrows",
        referencing(TagProfile {
            type_or_name_required: true,
            ..TagProfile::default()
        }),
    );

    set(
        "callback",
        defining(TagProfile {
            name_required: true,
            contexts: vec![AtTopLevel],
            ..TagProfile::default()
        }),
    );

    for name in ["class", "constructor"] {
        set(
            name,
            defining(TagProfile {
                type_allowed: true,
                contexts: vec![InFunction, InClassDecl, InClassExpr],
                ..TagProfile::default()
            }),
        );
    }

    set(
        "classdesc",
        TagProfile {
            contexts: vec![InFunction, InClassDecl, InClassExpr],
            ..TagProfile::default()
        },
    );

    for name in ["const", "constant"] {
        set(
            name,
            defining(TagProfile {
                type_allowed: true,
                contexts: vec![InConstDecl],
                ..TagProfile::default()
            }),
        );
    }

    set(
        "constructs",
        TagProfile {
            contexts: vec![InFunction, AtTopLevel],
            ..TagProfile::default()
        },
    );

    set(
        "copyright",
        TagProfile {
            contexts: vec![AtTopLevel],
            ..TagProfile::default()
        },
    );

    set(
        "define",
        TagProfile {
            type_required: is_closure,
            type_allowed: is_closure,
            ..TagProfile::default()
        },
    );

    set("emits", referencing(TagProfile::default()));

    set(
        "enum",
        TagProfile {
            type_allowed: true,
            ..TagProfile::default()
        },
    );

    set(
        "event",
        defining(TagProfile {
            name_required: true,
            ..TagProfile::default()
        }),
    );

    set(
        "exception",
        TagProfile {
            type_allowed: true,
            ..TagProfile::default()
        },
    );

    set(
        "export",
        TagProfile {
            type_allowed: is_closure_or_permissive,
            ..TagProfile::default()
        },
    );

    set(
        "extends",
        referencing(TagProfile {
            type_allowed: is_closure_or_permissive,
            name_required: is_jsdoc_or_typescript,
            type_or_name_required: is_closure_or_permissive,
            ..TagProfile::default()
        }),
    );

    for name in ["external", "host"] {
        set(
            name,
            defining(TagProfile {
                name_required: true,
                type_or_name_required: name == "host",
                contexts: if name == "external" {
                    vec![AtTopLevel]
                } else {
                    vec![]
                },
                ..TagProfile::default()
            }),
        );
    }

    set(
        "file",
        TagProfile {
            contexts: vec![AtTopLevel],
            ..TagProfile::default()
        },
    );

    set(
        "fires",
        referencing(TagProfile {
            contexts: vec![InFunction, AtTopLevel],
            ..TagProfile::default()
        }),
    );

    set(
        "function",
        defining(TagProfile {
            contexts: vec![AtTopLevel],
            ..TagProfile::default()
        }),
    );
    for name in ["func", "method"] {
        set(name, defining(TagProfile::default()));
    }

    set(
        "generator",
        TagProfile {
            contexts: vec![InFunction, AtTopLevel],
            ..TagProfile::default()
        },
    );

    set(
        "hideconstructor",
        TagProfile {
            contexts: vec![InFunction, InClassDecl, InClassExpr],
            ..TagProfile::default()
        },
    );

    set(
        "implements",
        TagProfile {
            type_required: true,
            type_allowed: true,
            contexts: vec![
                InFunction,
                InClassDecl,
                InClassExpr,
                ContextSelector::TopLevelWithTags(&["callback", "function"]),
            ],
            ..TagProfile::default()
        },
    );

    set(
        "interface",
        TagProfile {
            name_contents: if is_jsdoc_typescript_or_permissive {
                NameContents::NamepathDefining
            } else {
                NameContents::Disallowed
            },
            contexts: vec![InFunction, AtTopLevel],
            ..TagProfile::default()
        },
    );

    set(
        "lends",
        referencing(TagProfile {
            type_or_name_required: true,
            ..TagProfile::default()
        }),
    );

    set(
        "license",
        TagProfile {
            contexts: vec![AtTopLevel],
            ..TagProfile::default()
        },
    );

    set(
        "listens",
        referencing(TagProfile {
            contexts: vec![InFunction, AtTopLevel],
            ..TagProfile::default()
        }),
    );

    for name in ["member", "var"] {
        set(
            name,
            defining(TagProfile {
                type_allowed: true,
                ..TagProfile::default()
            }),
        );
    }

    for name in ["memberof", "memberof!"] {
        set(
            name,
            referencing(TagProfile {
                type_or_name_required: true,
                ..TagProfile::default()
            }),
        );
    }

    set(
        "mixes",
        referencing(TagProfile {
            type_or_name_required: true,
            ..TagProfile::default()
        }),
    );

    set("mixin", defining(TagProfile::default()));

    // Undocumented upstream; examples show a type bracket.
    set(
        "modifies",
        TagProfile {
            type_allowed: true,
            ..TagProfile::default()
        },
    );

    set(
        "module",
        TagProfile {
            name_contents: if is_jsdoc {
                NameContents::NamepathDefining
            } else {
                NameContents::Text
            },
            type_allowed: true,
            contexts: vec![AtTopLevel],
            ..TagProfile::default()
        },
    );

    set(
        "name",
        defining(TagProfile {
            name_required: true,
            type_or_name_required: true,
            disallowed_cotags: vec!["function"],
            ..TagProfile::default()
        }),
    );

    set(
        "namespace",
        defining(TagProfile {
            type_allowed: true,
            ..TagProfile::default()
        }),
    );

    for name in ["package", "private", "protected", "public", "static"] {
        set(
            name,
            TagProfile {
                type_allowed: is_closure_or_permissive,
                ..TagProfile::default()
            },
        );
    }

    for name in ["prop", "property"] {
        set(
            name,
            defining(TagProfile {
                name_required: true,
                type_allowed: true,
                ..TagProfile::default()
            }),
        );
    }

    for name in ["returns", "return"] {
        set(
            name,
            TagProfile {
                type_allowed: true,
                contexts: vec![InFunction, AtTopLevel],
                ..TagProfile::default()
            },
        );
    }

    // `see` allows either a namepath or text; only a configured override
    // switches it to namepath-referencing enforcement.
    set(
        "see",
        TagProfile {
            name_contents: NameContents::Text,
            ..TagProfile::default()
        },
    );

    set(
        "template",
        TagProfile {
            name_contents: if is_jsdoc {
                NameContents::Text
            } else {
                NameContents::NamepathReferencing
            },
            type_allowed: is_typescript_or_closure || is_permissive,
            ..TagProfile::default()
        },
    );

    set(
        "this",
        TagProfile {
            name_contents: if is_jsdoc {
                NameContents::NamepathReferencing
            } else {
                NameContents::Disallowed
            },
            type_required: is_typescript_or_closure,
            type_allowed: is_typescript_or_closure,
            type_or_name_required: is_jsdoc,
            contexts: vec![InFunction, AtTopLevel],
            ..TagProfile::default()
        },
    );

    set(
        "throws",
        TagProfile {
            type_allowed: true,
            ..TagProfile::default()
        },
    );

    set(
        "type",
        TagProfile {
            type_required: true,
            type_allowed: true,
            ..TagProfile::default()
        },
    );

    set(
        "typedef",
        defining(TagProfile {
            name_required: is_jsdoc_typescript_or_permissive,
            type_allowed: true,
            type_or_name_required: true,
            contexts: vec![AtTopLevel],
            ..TagProfile::default()
        }),
    );

    for name in ["yields", "yield"] {
        set(
            name,
            TagProfile {
                type_allowed: true,
                contexts: vec![InFunction, AtTopLevel],
                ..TagProfile::default()
            },
        );
    }

    table
}

/// The profile table for a dialect, built once per process.
pub fn profile_table(dialect: Dialect) -> &'static ProfileTable {
    static JSDOC: OnceLock<ProfileTable> = OnceLock::new();
    static TYPESCRIPT: OnceLock<ProfileTable> = OnceLock::new();
    static CLOSURE: OnceLock<ProfileTable> = OnceLock::new();
    static PERMISSIVE: OnceLock<ProfileTable> = OnceLock::new();

    match dialect {
        Dialect::Jsdoc => JSDOC.get_or_init(|| build_profiles(dialect)),
        Dialect::Typescript => TYPESCRIPT.get_or_init(|| build_profiles(dialect)),
        Dialect::Closure => CLOSURE.get_or_init(|| build_profiles(dialect)),
        Dialect::Permissive => PERMISSIVE.get_or_init(|| build_profiles(dialect)),
    }
}

/// Look up the profile for a tag, falling back to the permissive profile
/// for tags absent from the table.
pub fn profile_for(dialect: Dialect, tag: &str) -> TagProfile {
    profile_table(dialect)
        .get(tag)
        .cloned()
        .unwrap_or_else(TagProfile::permissive)
}
