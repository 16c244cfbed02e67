//! `featsynth batch` command - Analyze every matching file under a directory
//!
//! Files are analyzed in parallel; each file gets its own analysis and
//! nothing is shared between them, so the output equals running `analyze`
//! on each file.

use console::style;
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{decode_lossy, truncate_str};
use crate::cli::output::{effective_format, to_structured, write_output};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{analyze, Config};
use crate::entities::analysis::AnalysisParams;

use super::analyze::{parse_threshold, resolve_params};

#[derive(clap::Args, Debug)]
pub struct BatchArgs {
    /// Directory to scan
    pub dir: PathBuf,

    /// File extensions to include (default: from config, else step,stp,stl,iges,igs)
    #[arg(long, short = 'e', value_delimiter = ',')]
    pub ext: Vec<String>,

    /// Confidence threshold to report (0..1)
    #[arg(long, short = 't', value_parser = parse_threshold)]
    pub confidence_threshold: Option<f64>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// One summary row per analyzed file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub path: String,
    pub analysis_id: String,
    pub total_features: usize,
    pub average_confidence: f64,
    pub above_threshold: usize,
    pub processing_time: u32,
}

/// Collect matching files below `dir`, sorted by path
pub fn collect_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.iter().any(|want| want.eq_ignore_ascii_case(e)))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Analyze files in parallel, preserving input order
pub fn analyze_files(root: &Path, files: &[PathBuf], params: &AnalysisParams) -> Vec<BatchEntry> {
    files
        .par_iter()
        .filter_map(|path| match std::fs::read(path) {
            Ok(bytes) => {
                let result = analyze(&decode_lossy(bytes), params);
                let rel = path.strip_prefix(root).unwrap_or(path);
                Some(BatchEntry {
                    path: rel.display().to_string(),
                    analysis_id: result.metadata.analysis_id.clone(),
                    total_features: result.statistics.total_features,
                    average_confidence: result.statistics.average_confidence,
                    above_threshold: result.confident_features().count(),
                    processing_time: result.metadata.processing_time,
                })
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                None
            }
        })
        .collect()
}

pub fn run(args: BatchArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    if !args.dir.is_dir() {
        return Err(miette::miette!(
            "Not a directory: {}",
            args.dir.display()
        ));
    }

    let extensions = if args.ext.is_empty() {
        config.batch_extensions()
    } else {
        args.ext
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect()
    };

    let files = collect_files(&args.dir, &extensions);
    let params = resolve_params(args.confidence_threshold, &config);
    let entries = analyze_files(&args.dir, &files, &params);

    let format = effective_format(
        global.resolved_format(config.default_format.as_deref()),
        true,
    );
    let rendered = render_entries(&entries, format)?;
    write_output(&rendered, args.output.as_deref(), global.quiet)?;

    if !global.quiet {
        eprintln!(
            "{} {} file(s) analyzed",
            style("✓").green(),
            style(entries.len()).cyan()
        );
    }

    Ok(())
}

const BATCH_HEADERS: [&str; 6] = [
    "PATH",
    "ANALYSIS_ID",
    "FEATURES",
    "AVG_CONF",
    "ABOVE_THRESHOLD",
    "TIME_MS",
];

fn entry_row(entry: &BatchEntry) -> [String; 6] {
    [
        entry.path.clone(),
        entry.analysis_id.clone(),
        entry.total_features.to_string(),
        format!("{:.3}", entry.average_confidence),
        entry.above_threshold.to_string(),
        entry.processing_time.to_string(),
    ]
}

fn render_entries(entries: &[BatchEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tsv => {
            let mut out = BATCH_HEADERS.join("\t");
            out.push('\n');
            for entry in entries {
                out.push_str(&entry_row(entry).join("\t"));
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(BATCH_HEADERS).into_diagnostic()?;
            for entry in entries {
                writer.write_record(&entry_row(entry)).into_diagnostic()?;
            }
            let bytes = writer.into_inner().into_diagnostic()?;
            String::from_utf8(bytes).into_diagnostic()
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(BATCH_HEADERS);
            for entry in entries {
                let mut row = entry_row(entry);
                row[0] = truncate_str(&row[0], 48);
                builder.push_record(row);
            }
            let mut out = String::from("# Batch Analysis\n\n");
            out.push_str(&builder.build().with(Style::markdown()).to_string());
            out.push('\n');
            Ok(out)
        }
        other => to_structured(&entries, other),
    }
}
