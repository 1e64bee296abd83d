//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Metacurate: directive-driven curation of metabolic models
#[derive(Parser)]
#[command(name = "metacurate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply curation directives to a model and save the curated model
    Curate {
        /// Directory holding compartments.json, processes.json,
        /// metabolites.json and reactions.json
        #[arg(value_name = "MODEL_DIR")]
        model: PathBuf,

        /// Directory holding curation_<collection>.tsv directive files
        #[arg(short, long, value_name = "DIR")]
        directives: PathBuf,

        /// Output directory (default: <MODEL_DIR>/../curation)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with cascade policies and the delete marker
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Also write flattened TSV reports of every collection
        #[arg(long)]
        reports: bool,

        /// Print the curation outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview what a directive set would do, without writing anything
    Diff {
        #[arg(value_name = "MODEL_DIR")]
        model: PathBuf,

        #[arg(short, long, value_name = "DIR")]
        directives: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Show only directives that would change something
        #[arg(long)]
        changed_only: bool,
    },

    /// Show collection counts and integrity violations of a model
    Status {
        #[arg(value_name = "MODEL_DIR")]
        model: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
