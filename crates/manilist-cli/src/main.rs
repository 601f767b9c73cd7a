//! Manilist CLI - Command-line utility for listing and managing local
//! manifest lists.

mod cli;
mod commands;
mod context;
mod error;

use anyhow::Result;
use clap::Parser;
use console::Term;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn run(cli: &cli::Cli) -> Result<()> {
    let mut out = Term::stdout();

    match &cli.command {
        cli::Commands::Manifest(command) => {
            let ctx = context::CliContext::load(cli.config.as_deref())?;
            match command {
                cli::ManifestCommands::Ls(args) => commands::list::execute(
                    &commands::list::ListOptions::from(args),
                    &ctx.store,
                    &ctx.config,
                    &mut out,
                ),
                cli::ManifestCommands::Rm(args) => commands::rm::execute(args, &ctx.store),
            }
        }
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell, &mut out);
            Ok(())
        }
    }
}

/// Logs go to stderr. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
