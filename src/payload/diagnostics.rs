//! Payload error diagnostics with source spans

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A payload that could not be decoded, pointing at the offending byte
#[derive(Debug, Error, Diagnostic)]
#[error("malformed payload: {message}")]
#[diagnostic(code(featsynth::payload::syntax))]
pub struct PayloadSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl PayloadSyntaxError {
    /// Build from a decoder message and a 1-based line/column
    pub fn new(
        message: impl Into<String>,
        source: &str,
        source_name: &str,
        line: usize,
        column: usize,
    ) -> Self {
        let message = message.into();
        let offset = byte_offset(source, line, column);
        Self {
            src: NamedSource::new(source_name, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help: hint_for(&message),
            message,
        }
    }

    pub fn from_json(err: &serde_json::Error, source: &str, source_name: &str) -> Self {
        Self::new(err.to_string(), source, source_name, err.line(), err.column())
    }

    /// serde_yml reports no location for some errors; those point at the start
    pub fn from_yaml(err: &serde_yml::Error, source: &str, source_name: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));
        Self::new(err.to_string(), source, source_name, line, column)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum PayloadError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] PayloadSyntaxError),

    #[error("could not read payload: {0}")]
    #[diagnostic(code(featsynth::payload::io))]
    Io(#[from] std::io::Error),
}

/// Byte offset of a 1-based line/column, clamped to the end of the source
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;
    for (n, text) in source.split_inclusive('\n').enumerate() {
        if n + 1 == line {
            let within = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(0);
            return line_start + within;
        }
        line_start += text.len();
    }
    source.len().saturating_sub(1)
}

/// Suggestion for the common ways a hand-written payload goes wrong
fn hint_for(message: &str) -> Option<String> {
    let msg = message.to_lowercase();
    let hint = if msg.contains("control character") {
        "Escape newlines and tabs inside documentText (\\n, \\t)."
    } else if msg.contains("eof while parsing") {
        "The payload ends early; look for a missing closing brace or quote."
    } else if msg.contains("trailing comma") {
        "Remove the comma after the last field."
    } else if msg.contains("invalid type") {
        "documentText must be a string and analysisParams a mapping, e.g. {\"confidenceThreshold\": 0.8}."
    } else if msg.contains("tab") {
        "YAML payloads are indented with spaces, not tabs."
    } else {
        return None;
    };
    Some(hint.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset() {
        let source = "ab\ncdé\nf";
        assert_eq!(byte_offset(source, 1, 1), 0);
        assert_eq!(byte_offset(source, 2, 1), 3);
        assert_eq!(byte_offset(source, 2, 3), 5);
        assert_eq!(byte_offset(source, 3, 1), 8);
        assert_eq!(byte_offset(source, 9, 1), 8);
    }

    #[test]
    fn test_hints() {
        assert!(hint_for("EOF while parsing an object").is_some());
        assert!(hint_for("trailing comma at line 3").is_some());
        assert!(hint_for("something else").is_none());
    }

    #[test]
    fn test_json_error_carries_hint() {
        let source = "{\n  \"documentText\": \"abc\",\n}";
        let err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        let diag = PayloadSyntaxError::from_json(&err, source, "payload.json");
        assert!(diag.message().contains("trailing comma"));
        assert!(diag.help.is_some());
    }
}
