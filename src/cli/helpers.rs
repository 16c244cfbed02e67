//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use miette::{IntoDiagnostic, Result, WrapErr};
use std::io::Read;
use std::path::Path;

use crate::entities::feature::Point3;

/// Read an input document, `-` meaning stdin
///
/// Bytes that are not valid UTF-8 are replaced before hashing, so binary
/// payloads still analyze deterministically.
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).into_diagnostic()?;
        buf
    } else {
        std::fs::read(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?
    };

    Ok(decode_lossy(bytes))
}

/// Decode bytes as UTF-8, replacing invalid sequences
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Display name for an input path
pub fn source_name(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Format a point as "(x, y, z)" with two decimals
pub fn format_point(p: &Point3) -> String {
    format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
