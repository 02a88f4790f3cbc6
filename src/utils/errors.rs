use thiserror::Error;

/// Errors raised anywhere in the read-parse-classify-render pipeline
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Input file not found or unreadable: {path}")]
    InputNotFound { path: String },
    #[error("Malformed line {line} ({content:?}): {reason}")]
    MalformedLine {
        line: usize,
        content: String,
        reason: String,
    },
    #[error("Limit order at tick {tick_index} has no order type (explicit-type policy)")]
    MissingOrderSide { tick_index: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("{0}")]
    Usage(String),
}

impl AnalysisError {
    pub fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedLine {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}

/// Shorten an error message for the final log line
///
/// Keeps only the first line, so multi-line backend errors
/// do not flood the terminal.
pub fn extract_clean_error(error_msg: &str) -> String {
    error_msg
        .lines()
        .next()
        .map(|l| l.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_line() {
        let err = AnalysisError::malformed(3, "abc", "invalid digit");
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("\"abc\""));
        assert!(msg.contains("invalid digit"));
    }

    #[test]
    fn test_extract_clean_error() {
        assert_eq!(extract_clean_error("Render failed: boom\nbacktrace..."), "Render failed: boom");
        assert_eq!(extract_clean_error(""), "");
    }
}
