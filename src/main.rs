use clap::Parser;
use miette::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use featsynth::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE so piping into `head` terminates quietly instead of panicking
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    // RUST_LOG wins over -v/-q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(global.log_level()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    match cli.command {
        Commands::Analyze(args) => featsynth::cli::commands::analyze::run(args, &global),
        Commands::Labels(args) => featsynth::cli::commands::labels::run(args, &global),
        Commands::Fingerprint(args) => featsynth::cli::commands::fingerprint::run(args, &global),
        Commands::Request(args) => featsynth::cli::commands::request::run(args, &global),
        Commands::Batch(args) => featsynth::cli::commands::batch::run(args, &global),
        Commands::Config(cmd) => featsynth::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => featsynth::cli::commands::completions::run(args),
    }
}
