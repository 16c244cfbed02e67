//! `featsynth fingerprint` command - Seed and identifiers for an input

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::read_document;
use crate::cli::output::to_structured;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{analysis_id, content_hash, processing_time, Config, HASH_WINDOW};

#[derive(clap::Args, Debug)]
pub struct FingerprintArgs {
    /// Input file (`-` for stdin)
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Fingerprint a literal string instead of a file
    #[arg(long)]
    pub text: Option<String>,
}

/// Deterministic identifiers derived from the input text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fingerprint {
    pub hash: u32,
    pub analysis_id: String,
    pub processing_time: u32,
    /// UTF-16 code units that contributed to the hash
    pub hashed_units: usize,
}

impl Fingerprint {
    pub fn of(text: &str) -> Self {
        Self {
            hash: content_hash(text),
            analysis_id: analysis_id(text),
            processing_time: processing_time(text),
            hashed_units: text.encode_utf16().count().min(HASH_WINDOW),
        }
    }
}

pub fn run(args: FingerprintArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let text = match (args.text, args.input) {
        (Some(text), _) => text,
        (None, Some(path)) => read_document(&path)?,
        (None, None) => return Err(miette::miette!("Provide an input file or --text")),
    };

    let fp = Fingerprint::of(&text);

    match global.resolved_format(config.default_format.as_deref()) {
        format @ (OutputFormat::Json | OutputFormat::Yaml) => {
            print!("{}", to_structured(&fp, format)?);
        }
        format @ (OutputFormat::Tsv | OutputFormat::Csv) => {
            let sep = if format == OutputFormat::Csv { "," } else { "\t" };
            println!(
                "{}",
                [
                    fp.hash.to_string(),
                    fp.analysis_id.clone(),
                    fp.processing_time.to_string(),
                    fp.hashed_units.to_string(),
                ]
                .join(sep)
            );
        }
        OutputFormat::Auto | OutputFormat::Md => {
            println!("{}         {}", style("Hash:").bold(), fp.hash);
            println!("{}     {}", style("Analysis:").bold(), style(&fp.analysis_id).cyan());
            println!("{}   {} ms", style("Processing:").bold(), fp.processing_time);
            println!("{} {}", style("Hashed units:").dim(), fp.hashed_units);
        }
    }

    Ok(())
}
