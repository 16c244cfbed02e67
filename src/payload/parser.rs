//! Payload decoding
//!
//! A payload whose first non-blank character is `{` is decoded as JSON so
//! error positions are exact; anything else goes through the YAML decoder
//! (which also accepts most JSON).

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::payload::diagnostics::{PayloadError, PayloadSyntaxError};

pub fn parse_payload<T: DeserializeOwned>(content: &str, source_name: &str) -> Result<T, PayloadError> {
    let decoded = if content.trim_start().starts_with('{') {
        serde_json::from_str(content)
            .map_err(|e| PayloadSyntaxError::from_json(&e, content, source_name))
    } else {
        serde_yml::from_str(content)
            .map_err(|e| PayloadSyntaxError::from_yaml(&e, content, source_name))
    };
    Ok(decoded?)
}

pub fn read_payload_file<T: DeserializeOwned>(path: &Path) -> Result<T, PayloadError> {
    let content = std::fs::read_to_string(path)?;
    parse_payload(&content, &path.display().to_string())
}
