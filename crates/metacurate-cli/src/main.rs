//! Metacurate CLI - directive-driven metabolic model curation.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::Level;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Curate {
            model,
            directives,
            output,
            config,
            reports,
            json,
        } => commands::curate::run(model, directives, output, config, reports, json, cli.verbose),

        Commands::Diff {
            model,
            directives,
            config,
            changed_only,
        } => commands::diff::run(model, directives, config, changed_only, cli.verbose),

        Commands::Status { model, json } => commands::status::run(model, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
