//! The violation reporting sink.
//!
//! Checks never return errors for findings; they push [`Violation`]s
//! into a [`Reporter`]. A violation optionally carries a fix: a batch
//! of [`TagEdit`]s against the owning block's tag sequence, which the
//! host applies and re-serializes if fixing was requested.
//!
//! The sink also carries one cross-cutting side effect: successfully
//! resolved type names mark the corresponding binding as used, so the
//! host can suppress its own unused-variable diagnostics.

use doctag_core::block::TagEdit;

/// Violation severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One reported finding.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Name of the check that produced this finding.
    pub check: &'static str,

    /// Human-readable message.
    pub message: String,

    /// Severity of the finding.
    pub severity: Severity,

    /// 1-based source line the finding is anchored at, when known.
    pub line: Option<usize>,

    /// Index of the owning tag within the block's tag sequence.
    pub tag_index: Option<usize>,

    /// Batch fix against the block's tag sequence.
    pub fix: Option<Vec<TagEdit>>,
}

impl Violation {
    /// Create an error-severity violation.
    pub fn error(check: &'static str, message: impl Into<String>) -> Self {
        Violation {
            check,
            message: message.into(),
            severity: Severity::Error,
            line: None,
            tag_index: None,
            fix: None,
        }
    }

    /// Create a warning-severity violation.
    pub fn warning(check: &'static str, message: impl Into<String>) -> Self {
        Violation {
            severity: Severity::Warning,
            ..Violation::error(check, message)
        }
    }

    /// Anchor the violation at a 1-based source line.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach the owning tag's index within the block.
    pub fn with_tag_index(mut self, index: usize) -> Self {
        self.tag_index = Some(index);
        self
    }

    /// Attach a batch fix.
    pub fn with_fix(mut self, edits: Vec<TagEdit>) -> Self {
        self.fix = Some(edits);
        self
    }
}

/// Sink for violations and resolution side effects.
pub trait Reporter {
    /// Record one finding.
    fn report(&mut self, violation: Violation);

    /// Mark a scope binding as used by a resolved type reference.
    fn mark_variable_used(&mut self, name: &str);
}

/// A [`Reporter`] that collects everything in memory.
#[derive(Debug, Default)]
pub struct Collector {
    pub violations: Vec<Violation>,
    pub used_variables: Vec<String>,
}

impl Collector {
    pub fn new() -> Self {
        Collector::default()
    }

    /// All collected messages, in report order.
    pub fn messages(&self) -> Vec<&str> {
        self.violations
            .iter()
            .map(|violation| violation.message.as_str())
            .collect()
    }

    /// Whether any error-severity violation was collected.
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.severity == Severity::Error)
    }
}

impl Reporter for Collector {
    fn report(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    fn mark_variable_used(&mut self, name: &str) {
        if !self.used_variables.iter().any(|used| used == name) {
            self.used_variables.push(name.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let violation = Violation::error("check-param-names", "Duplicate @param \"foo\"")
            .with_line(4)
            .with_tag_index(1);
        assert_eq!(violation.severity, Severity::Error);
        assert_eq!(violation.line, Some(4));
        assert_eq!(violation.tag_index, Some(1));
        assert!(violation.fix.is_none());
    }

    #[test]
    fn test_collector_gathers_in_order() {
        let mut collector = Collector::new();
        collector.report(Violation::warning("a", "first"));
        collector.report(Violation::error("b", "second"));
        assert_eq!(collector.messages(), vec!["first", "second"]);
        assert!(collector.has_errors());
    }

    #[test]
    fn test_mark_variable_used_dedupes() {
        let mut collector = Collector::new();
        collector.mark_variable_used("Foo");
        collector.mark_variable_used("Foo");
        collector.mark_variable_used("Bar");
        assert_eq!(collector.used_variables, vec!["Foo", "Bar"]);
    }
}
