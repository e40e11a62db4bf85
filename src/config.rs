//! Configuration file handling.
//!
//! This module handles loading configuration from a TOML file given
//! with `--config` and merging it with command-line arguments.

use crate::models::{EmptyLinePolicy, OutputFormat};
use crate::report::RenderOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input handling settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Log run statistics after the output is written.
    #[serde(default)]
    pub stats: bool,
}

/// Input handling settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// What to do with lines that hold no tokens.
    #[serde(default)]
    pub empty_lines: EmptyLinePolicy,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Emit `name ` rather than `name` for a variable without values.
    #[serde(default = "default_true")]
    pub trailing_space: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            trailing_space: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(policy) = args.empty_lines {
            self.input.empty_lines = policy;
        }

        if let Some(format) = args.format {
            self.output.format = format;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
        if args.stats {
            self.general.stats = true;
        }
    }

    /// Rendering options derived from the output section.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.output.format,
            trailing_space: self.output.trailing_space,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
