//! Output generation.
//!
//! This module renders merged variables as text or JSON. Rendering
//! happens fully in memory so nothing reaches the output stream unless
//! the whole run succeeded.

use crate::error::MergeError;
use crate::models::{MergedVariable, OutputFormat};
use std::collections::BTreeMap;
use std::io::Write;

/// Options controlling how merged variables are rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Keep the separator after a name that has no values.
    pub trailing_space: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            trailing_space: true,
        }
    }
}

/// Render variables in the configured format.
pub fn render(variables: &[MergedVariable], options: RenderOptions) -> Result<String, MergeError> {
    match options.format {
        OutputFormat::Text => Ok(generate_text_report(variables, options.trailing_space)),
        OutputFormat::Json => generate_json_report(variables),
    }
}

/// Generate one `name value...` line per variable.
pub fn generate_text_report(variables: &[MergedVariable], trailing_space: bool) -> String {
    let mut output = String::new();

    for variable in variables {
        output.push_str(&generate_line(variable, trailing_space));
        output.push('\n');
    }

    output
}

/// Generate the line for a single variable, without the newline.
fn generate_line(variable: &MergedVariable, trailing_space: bool) -> String {
    if variable.is_bare() && !trailing_space {
        return variable.name.clone();
    }

    format!("{} {}", variable.name, variable.values.join(" "))
}

/// Generate a JSON object mapping each name to its values.
pub fn generate_json_report(variables: &[MergedVariable]) -> Result<String, MergeError> {
    let map: BTreeMap<&str, &[String]> = variables
        .iter()
        .map(|v| (v.name.as_str(), v.values.as_slice()))
        .collect();

    let mut json = serde_json::to_string_pretty(&map)?;
    json.push('\n');
    Ok(json)
}

/// Write rendered output in a single pass and flush it.
pub fn write_output<W: Write>(writer: &mut W, content: &str) -> Result<(), MergeError> {
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}
