//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    analyze::AnalyzeArgs, batch::BatchArgs, completions::CompletionsArgs, config::ConfigCommands,
    fingerprint::FingerprintArgs, labels::LabelsArgs, request::RequestArgs,
};

#[derive(Parser)]
#[command(name = "featsynth")]
#[command(author, version, about = "Deterministic machining feature analysis")]
#[command(long_about = "Synthesizes a reproducible machining-feature analysis from CAD exchange payloads. The same input always yields the same features, labels and statistics.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format (default: from config, else auto)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl GlobalOpts {
    /// Requested format, falling back to the configured default
    pub fn resolved_format(&self, configured: Option<&str>) -> OutputFormat {
        self.format
            .or_else(|| configured.and_then(|f| OutputFormat::from_str(f, true).ok()))
            .unwrap_or_default()
    }

    /// Log filter directive for the tracing subscriber
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a CAD exchange file and print the full result
    Analyze(AnalyzeArgs),

    /// Print the face-label map for a CAD exchange file
    Labels(LabelsArgs),

    /// Show the content hash, analysis id and processing time for an input
    Fingerprint(FingerprintArgs),

    /// Handle a JSON/YAML request payload and print the response envelope
    Request(RequestArgs),

    /// Analyze every matching file under a directory
    Batch(BatchArgs),

    /// View and modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for one result, tsv for lists)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (for programming)
    Json,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown report
    Md,
}
