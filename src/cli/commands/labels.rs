//! `featsynth labels` command - Face-label map for one input

use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::read_document;
use crate::cli::output::{render_labels, write_output};
use crate::cli::GlobalOpts;
use crate::core::{build_face_labels, content_hash, synthesize, Config};

#[derive(clap::Args, Debug)]
pub struct LabelsArgs {
    /// Input file (`-` for stdin)
    pub input: PathBuf,

    /// Only show faces claimed by a feature
    #[arg(long)]
    pub features_only: bool,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: LabelsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let text = read_document(&args.input)?;

    let features = synthesize(content_hash(&text));
    let mut labels = build_face_labels(&features);
    if args.features_only {
        labels.retain(|_, label| !label.is_stock());
    }

    let format = global.resolved_format(config.default_format.as_deref());
    let rendered = render_labels(&labels, format)?;
    write_output(&rendered, args.output.as_deref(), global.quiet)
}
