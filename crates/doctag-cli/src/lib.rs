//! doctag CLI library
//!
//! This module contains the core CLI logic for the doctag analyzer:
//! file reading, comment extraction, check execution, and diagnostic
//! rendering.

pub mod error_adapter;
pub mod extract;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::{ErrorAdapter, ViolationAdapter};

use std::fs;

use log::{info, warn};
use thiserror::Error;

use doctag::{
    BuiltinCheck, Collector, EngineError, WarnTracker, analyze_comments, resolve_dialect,
};
use doctag_parser::{parse_comment, stringify_block};

/// Top-level CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// The analysis outcome of one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Total violations across all inputs.
    pub violations: usize,

    /// Whether any violation carried error severity.
    pub has_errors: bool,
}

/// Run the doctag CLI application
///
/// Analyzes every input file in all-comments mode, renders each
/// violation through miette, and reports whether any error-severity
/// violation was produced.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - An empty check list
pub fn run(args: &Args) -> Result<RunSummary, CliError> {
    let mut settings = config::load_settings(args.config.as_ref())?;

    if let Some(raw) = &args.dialect {
        let mut tracker = WarnTracker::new();
        settings.dialect = resolve_dialect(raw, "command line", &mut tracker);
    }

    let mut summary = RunSummary::default();
    for input in &args.inputs {
        info!(input = input.as_str(); "Analyzing file");
        let source = fs::read_to_string(input)?;
        let comments = extract::extract_comments(&source);

        let mut collector = Collector::new();
        analyze_comments(&comments, &settings, &BuiltinCheck::ALL, &mut collector)?;

        render_violations(input, &source, &comments, &collector, args.fix_dry_run);
        summary.violations += collector.violations.len();
        summary.has_errors |= collector.has_errors();
    }

    Ok(summary)
}

fn render_violations(
    input: &str,
    source: &str,
    comments: &[doctag_core::ast::CommentRecord],
    collector: &Collector,
    fix_dry_run: bool,
) {
    let reporter = miette::GraphicalReportHandler::new();
    for violation in &collector.violations {
        let adapted = ViolationAdapter::new(violation, source);
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &adapted)
            .expect("Writing to String buffer is infallible");
        eprintln!("{input}: {writer}");
    }

    if fix_dry_run {
        print_fix_preview(comments, collector);
    }

    if collector.violations.is_empty() {
        info!(input; "No violations");
    } else {
        warn!(input, count = collector.violations.len(); "Violations found");
    }
}

/// Print each fixable comment block with its fixes applied.
///
/// Fixes are grouped per block so a batch of edits computed against the
/// original tag ordering is applied in one pass.
fn print_fix_preview(comments: &[doctag_core::ast::CommentRecord], collector: &Collector) {
    let doc_blocks: Vec<&doctag_core::ast::CommentRecord> = comments
        .iter()
        .filter(|record| record.is_doc_block())
        .collect();

    for record in doc_blocks {
        let edits: Vec<_> = collector
            .violations
            .iter()
            .filter(|violation| {
                violation.line.is_some_and(|line| {
                    line >= record.line
                        && line <= record.line + record.text.matches('\n').count()
                })
            })
            .filter_map(|violation| violation.fix.clone())
            .flatten()
            .collect();
        if edits.is_empty() {
            continue;
        }

        let mut block = parse_comment(&format!("/*{}*/", record.text));
        block.apply_edits(edits);
        println!("{}", stringify_block(&block));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_run_reports_undefined_type_as_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("input.js");
        let mut file = fs::File::create(&path).expect("create input");
        writeln!(file, "/**\n * @param {{Frobnicator}} f\n */").expect("write input");

        let args = Args {
            inputs: vec![path.to_string_lossy().to_string()],
            config: None,
            dialect: None,
            log_level: "off".to_owned(),
            fix_dry_run: false,
        };
        let summary = run(&args).expect("run succeeds");
        assert!(summary.has_errors);
        assert_eq!(summary.violations, 1);
    }

    #[test]
    fn test_run_clean_file_has_no_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("input.js");
        let mut file = fs::File::create(&path).expect("create input");
        writeln!(file, "/**\n * Plain prose only.\n */").expect("write input");

        let args = Args {
            inputs: vec![path.to_string_lossy().to_string()],
            config: None,
            dialect: None,
            log_level: "off".to_owned(),
            fix_dry_run: false,
        };
        let summary = run(&args).expect("run succeeds");
        assert!(!summary.has_errors);
        assert_eq!(summary.violations, 0);
    }

    #[test]
    fn test_missing_input_is_an_io_error() {
        let args = Args {
            inputs: vec!["/nonexistent/input.js".to_owned()],
            config: None,
            dialect: None,
            log_level: "off".to_owned(),
            fix_dry_run: false,
        };
        assert!(matches!(run(&args), Err(CliError::Io(_))));
    }
}
