//! Command-line interface argument parsing.
//!
//! Every flag is optional; running without arguments reads standard
//! input and prints the merged variables as text.

use crate::config::GeneralConfig;
use crate::models::{EmptyLinePolicy, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// merge-variables - merge variable definitions read from stdin
///
/// Each input line is a variable name followed by zero or more values.
/// Values are collected per name across all lines, deduplicated and
/// sorted, and one line per name is printed in sorted order.
///
/// Examples:
///   printf 'a 1 2\nb 3\na 2 3\n' | merge-variables
///   merge-variables --empty-lines fail < vars.txt
///   merge-variables --format json < vars.txt
///   merge-variables --print-config > merge-variables.toml
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How to treat lines without tokens
    ///
    /// `skip` ignores them (default), `fail` aborts with the offending line number.
    #[arg(long, value_name = "POLICY")]
    pub empty_lines: Option<EmptyLinePolicy>,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Log run statistics to stderr after writing the output
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref path) = self.config {
            if !path.is_file() {
                return Err(format!("Config file does not exist: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `general` is the configuration after merging with these arguments.
    /// Warnings and errors only by default so a clean run leaves stderr empty.
    pub fn log_level(&self, general: &GeneralConfig) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if general.verbose {
            tracing::Level::DEBUG
        } else if general.stats {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}
