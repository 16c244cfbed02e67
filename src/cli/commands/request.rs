//! `featsynth request` command - Run a request payload through the boundary
//!
//! Payload shape (JSON or YAML):
//!
//! ```json
//! {
//!   "documentText": "ISO-10303-21; ...",
//!   "fileName": "bracket.step",
//!   "analysisParams": { "confidenceThreshold": 0.8 }
//! }
//! ```

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{read_document, source_name};
use crate::cli::output::write_output;
use crate::cli::GlobalOpts;
use crate::request::handle;

#[derive(clap::Args, Debug)]
pub struct RequestArgs {
    /// Payload file (`-` or omitted for stdin)
    #[arg(default_value = "-")]
    pub payload: PathBuf,

    /// Write the response envelope to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: RequestArgs, global: &GlobalOpts) -> Result<()> {
    let content = read_document(&args.payload)?;
    let (response, rejection) = handle(&content, &source_name(&args.payload));

    let mut json = response.to_json().into_diagnostic()?;
    json.push('\n');
    write_output(&json, args.output.as_deref(), global.quiet)?;

    match rejection {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
