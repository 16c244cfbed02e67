//! CLI command implementations

pub mod analyze;
pub mod batch;
pub mod completions;
pub mod config;
pub mod fingerprint;
pub mod labels;
pub mod request;
