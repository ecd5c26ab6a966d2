//! Built-in checks and the analysis entry points.
//!
//! Each check is a free function over a [`DocContext`]; the
//! [`BuiltinCheck`] enum names them for selection and dispatch. The
//! `analyze_*` functions wire a check list into the iteration driver.

pub mod check_access;
pub mod check_param_names;
pub mod check_values;
pub mod no_undefined_types;
pub mod require_param;
pub mod require_returns_check;
pub mod valid_types;

use doctag_core::{
    ast::{CommentRecord, SourceTree},
    scope::ScopeChain,
};

use crate::{
    error::EngineError,
    iterate::{DocContext, iterate_all_comments, iterate_attached},
    report::Reporter,
    settings::Settings,
};

/// The built-in check set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCheck {
    RequireParam,
    CheckParamNames,
    NoUndefinedTypes,
    ValidTypes,
    RequireReturnsCheck,
    CheckValues,
    CheckAccess,
}

impl BuiltinCheck {
    /// Every built-in check, in dispatch order.
    pub const ALL: [BuiltinCheck; 7] = [
        BuiltinCheck::RequireParam,
        BuiltinCheck::CheckParamNames,
        BuiltinCheck::NoUndefinedTypes,
        BuiltinCheck::ValidTypes,
        BuiltinCheck::RequireReturnsCheck,
        BuiltinCheck::CheckValues,
        BuiltinCheck::CheckAccess,
    ];

    /// The kebab-case check name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinCheck::RequireParam => "require-param",
            BuiltinCheck::CheckParamNames => "check-param-names",
            BuiltinCheck::NoUndefinedTypes => "no-undefined-types",
            BuiltinCheck::ValidTypes => "valid-types",
            BuiltinCheck::RequireReturnsCheck => "require-returns-check",
            BuiltinCheck::CheckValues => "check-values",
            BuiltinCheck::CheckAccess => "check-access",
        }
    }

    /// Look a check up by its report name.
    pub fn by_name(name: &str) -> Option<BuiltinCheck> {
        BuiltinCheck::ALL
            .into_iter()
            .find(|check| check.name() == name)
    }

    /// Run this check against one documented declaration.
    pub fn run(self, context: &DocContext<'_>, reporter: &mut dyn Reporter) {
        match self {
            BuiltinCheck::RequireParam => require_param::run(context, reporter),
            BuiltinCheck::CheckParamNames => check_param_names::run(context, reporter),
            BuiltinCheck::NoUndefinedTypes => no_undefined_types::run(context, reporter),
            BuiltinCheck::ValidTypes => valid_types::run(context, reporter),
            BuiltinCheck::RequireReturnsCheck => require_returns_check::run(context, reporter),
            BuiltinCheck::CheckValues => check_values::run(context, reporter),
            BuiltinCheck::CheckAccess => check_access::run(context, reporter),
        }
    }
}

/// Run a check list over a parsed file in attached mode.
pub fn analyze_file(
    tree: &SourceTree,
    scopes: &ScopeChain,
    comments: &[CommentRecord],
    settings: &Settings,
    checks: &[BuiltinCheck],
    reporter: &mut dyn Reporter,
) -> Result<(), EngineError> {
    if checks.is_empty() {
        return Err(EngineError::NoChecks);
    }
    iterate_attached(tree, scopes, comments, settings, reporter, |context, reporter| {
        for check in checks {
            check.run(context, reporter);
        }
    });
    Ok(())
}

/// Run a check list over raw comments in all-comments mode.
pub fn analyze_comments(
    comments: &[CommentRecord],
    settings: &Settings,
    checks: &[BuiltinCheck],
    reporter: &mut dyn Reporter,
) -> Result<(), EngineError> {
    if checks.is_empty() {
        return Err(EngineError::NoChecks);
    }
    iterate_all_comments(comments, settings, reporter, |context, reporter| {
        for check in checks {
            check.run(context, reporter);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Collector;

    #[test]
    fn test_empty_check_list_is_a_contract_error() {
        let mut collector = Collector::new();
        let result = analyze_comments(&[], &Settings::default(), &[], &mut collector);
        assert!(matches!(result, Err(EngineError::NoChecks)));
    }

    #[test]
    fn test_by_name_round_trips() {
        for check in BuiltinCheck::ALL {
            assert_eq!(BuiltinCheck::by_name(check.name()), Some(check));
        }
        assert_eq!(BuiltinCheck::by_name("no-such-check"), None);
    }
}
