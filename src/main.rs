//! merge-variables - merge variable definitions read from standard input
//!
//! Reads lines of the form `name value...`, collects every value under its
//! name, and prints one line per name with its sorted, deduplicated values.
//! Names are printed in sorted order.
//!
//! Exit codes:
//!   0 - Success
//!   1 - I/O error, malformed input (with `--empty-lines fail`), or bad configuration

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod reader;
mod report;

use analysis::Aggregate;
use anyhow::Result;
use cli::Args;
use config::Config;
use error::MergeError;
use models::Summary;
use reader::RecordReader;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --print-config early (no logging, no input)
    if args.print_config {
        print!("{}", Config::default_toml());
        return;
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&args, &config);

    debug!("merge-variables v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!(
        empty_lines = %config.input.empty_lines,
        format = ?config.output.format,
        "Effective configuration"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    match merge_stream(stdin.lock(), &mut stdout.lock(), &config) {
        Ok(summary) => {
            if config.general.stats {
                info!("{}", summary);
            }
        }
        Err(e) => {
            error!("Merge failed: {}", e);
            if e.is_input_format() {
                eprintln!("Error: {} (use --empty-lines skip to ignore blank lines)", e);
            } else {
                eprintln!("Error: {}", e);
            }
            std::process::exit(1);
        }
    }
}

/// Initialize logging based on verbosity settings.
///
/// Diagnostics go to stderr; stdout carries only the merged output.
fn init_logging(args: &Args, config: &Config) {
    let level = args.log_level(&config.general);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from `--config` or use defaults, then apply CLI overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    config.merge_with_args(args);
    Ok(config)
}

/// Read every record from `input`, then render and write the merged variables.
///
/// Nothing is written to `output` unless reading and rendering both succeed.
fn merge_stream<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
) -> Result<Summary, MergeError> {
    let mut records = RecordReader::new(input, config.input.empty_lines);
    let aggregate = Aggregate::collect(&mut records)?;

    debug!(
        names = aggregate.len(),
        records = aggregate.records(),
        values = aggregate.values_seen(),
        "Input aggregated"
    );
    if aggregate.is_empty() {
        debug!("No records read");
    }

    let summary = aggregate.summarize(records.lines_read(), records.skipped_lines());
    let variables = aggregate.finalize();
    let rendered = report::render(&variables, config.render_options())?;

    report::write_output(output, &rendered)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmptyLinePolicy, OutputFormat};
    use std::io::Cursor;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run(input: &str, config: &Config) -> Result<String, MergeError> {
        let mut output = Vec::new();
        merge_stream(Cursor::new(input), &mut output, config)?;
        Ok(String::from_utf8(output).unwrap())
    }

    fn run_default(input: &str) -> String {
        run(input, &Config::default()).unwrap()
    }

    #[test]
    fn test_merges_across_lines() {
        assert_eq!(run_default("a 1 2\nb 3\na 2 3\n"), "a 1 2 3\nb 3\n");
    }

    #[test]
    fn test_deduplicates_values() {
        assert_eq!(run_default("x foo\nx bar\nx foo\n"), "x bar foo\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(run_default(""), "");
    }

    #[test]
    fn test_name_only() {
        assert_eq!(run_default("z\n"), "z \n");
    }

    #[test]
    fn test_output_is_a_fixed_point() {
        let once = run_default("b 2 1\na x\nz\nb 1 3\n\n");
        let twice = run_default(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_line_fail_writes_nothing() {
        let mut config = Config::default();
        config.input.empty_lines = EmptyLinePolicy::Fail;

        let mut output = Vec::new();
        let err = merge_stream(Cursor::new("a 1\n\nb 2\n"), &mut output, &config).unwrap_err();

        assert!(matches!(err, MergeError::InputFormat { line: 2 }));
        assert!(output.is_empty());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let err = merge_stream(Cursor::new("a 1\n"), &mut ClosedPipe, &Config::default())
            .unwrap_err();

        assert!(matches!(err, MergeError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert!(!err.is_input_format());
    }

    #[test]
    fn test_summary_counts() {
        let mut output = Vec::new();
        let summary =
            merge_stream(Cursor::new("a 1 1\n\nb 2\n"), &mut output, &Config::default()).unwrap();

        assert_eq!(summary.lines_read, 3);
        assert_eq!(summary.skipped_lines, 1);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.names, 2);
        assert_eq!(summary.values_seen, 3);
        assert_eq!(summary.unique_values, 2);
    }

    #[test]
    fn test_json_output() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Json;

        let json = run("a 2 1\nb\n", &config).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, serde_json::json!({ "a": ["1", "2"], "b": [] }));
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let args = <Args as clap::Parser>::parse_from(["merge-variables", "--format", "json"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
    }
}
