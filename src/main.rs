use clap::Parser;
use tracing_subscriber::EnvFilter;

mod annotate;
mod catalog;
mod cli;
mod core;
mod parsing;
mod partition;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("varsift=debug,info")
    } else {
        EnvFilter::new("varsift=warn")
    };

    // stdout carries VCF output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Gwascat(args) => {
            cli::gwascat::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Split(args) => {
            cli::split::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Join(args) => {
            cli::join::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
