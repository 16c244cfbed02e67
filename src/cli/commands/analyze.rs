//! `featsynth analyze` command - Full analysis of one CAD exchange file

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{read_document, source_name};
use crate::cli::output::{render_result, write_output};
use crate::cli::GlobalOpts;
use crate::core::{analyze, Config};
use crate::entities::analysis::{is_valid_threshold, AnalysisParams};

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Input file (`-` for stdin)
    pub input: PathBuf,

    /// Confidence threshold to report (0..1)
    #[arg(long, short = 't', value_parser = parse_threshold)]
    pub confidence_threshold: Option<f64>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Parse a confidence threshold, rejecting values outside [0, 1]
pub fn parse_threshold(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if is_valid_threshold(value) {
        Ok(value)
    } else {
        Err(format!("{} is outside 0..1", value))
    }
}

/// Parameters from the flag, else the configured threshold
pub fn resolve_params(flag: Option<f64>, config: &Config) -> AnalysisParams {
    AnalysisParams {
        confidence_threshold: flag.or(config.confidence_threshold),
    }
}

pub fn run(args: AnalyzeArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let text = read_document(&args.input)?;
    let params = resolve_params(args.confidence_threshold, &config);

    let result = analyze(&text, &params);

    if !global.quiet {
        eprintln!(
            "{} Analyzed {} {} {} feature(s), {}",
            style("✓").green(),
            style(source_name(&args.input)).cyan(),
            style("→").dim(),
            result.statistics.total_features,
            style(&result.metadata.analysis_id).yellow()
        );
    }

    let format = global.resolved_format(config.default_format.as_deref());
    let rendered = render_result(&result, format)?;
    write_output(&rendered, args.output.as_deref(), global.quiet)
}
