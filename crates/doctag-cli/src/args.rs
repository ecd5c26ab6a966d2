//! Command-line argument definitions for the doctag CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input files, configuration file
//! selection, dialect override, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the doctag analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Paths of the source files to analyze
    #[arg(required = true, help = "Paths of the source files to analyze")]
    pub inputs: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Tag-grammar dialect (permissive, jsdoc, typescript, closure)
    #[arg(short, long)]
    pub dialect: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print fixed comment blocks instead of writing anything
    #[arg(long)]
    pub fix_dry_run: bool,
}
