//! Error types for the merge pipeline.

use thiserror::Error;

/// Errors raised while reading, aggregating or emitting variables.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line without any tokens was read while the empty-line policy is `fail`.
    #[error("input format error: line {line} has no tokens")]
    InputFormat { line: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MergeError {
    /// Returns true if the error was caused by malformed input rather than I/O.
    pub fn is_input_format(&self) -> bool {
        matches!(self, MergeError::InputFormat { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_message_names_line() {
        let err = MergeError::InputFormat { line: 7 };
        assert_eq!(err.to_string(), "input format error: line 7 has no tokens");
        assert!(err.is_input_format());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: MergeError = io.into();
        assert!(!err.is_input_format());
        assert!(err.to_string().contains("pipe closed"));
    }
}
