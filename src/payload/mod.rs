//! Request payload decoding (JSON or YAML) with source-span diagnostics

pub mod diagnostics;
pub mod parser;

pub use diagnostics::{PayloadError, PayloadSyntaxError};
pub use parser::{parse_payload, read_payload_file};
