//! Curate command - apply directives and save the curated model.

use std::path::PathBuf;

use colored::Colorize;
use metacurate::{report, Curator, EntityKind};

use super::{default_output, load_config, load_inputs, print_sources, print_stages};

pub fn run(
    model: PathBuf,
    directives: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    reports: bool,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config.as_deref())?;
    let (store, set) = load_inputs(&model, &directives, &config)?;

    if !json_output {
        println!(
            "{} {} directives to {}",
            "Applying".cyan().bold(),
            set.len().to_string().white().bold(),
            model.display().to_string().white()
        );
    }

    let result = Curator::with_config(config).curate(&store, &set);

    let output_dir = output.unwrap_or_else(|| default_output(&model));
    result.store.save_dir(&output_dir)?;
    if reports {
        report::write_reports(&result.store, &output_dir)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result.outcome)?);
        return Ok(());
    }

    let summary = &result.outcome.summary;
    println!();
    print_sources(&result.outcome.sources);
    print_stages(&result.outcome.stages);
    println!();

    println!("{}", "Collections:".yellow().bold());
    for kind in EntityKind::ALL {
        let before = summary.before.get(kind);
        let after = summary.after.get(kind);
        let change = if after < before {
            format!("-{}", before - after).red()
        } else {
            "=".normal()
        };
        println!("  {:<12} {} → {} ({})", kind.plural(), before, after.to_string().white().bold(), change);
    }
    if summary.replicates_pruned > 0 {
        println!(
            "  Pruned {} dangling replicate reference(s)",
            summary.replicates_pruned.to_string().yellow()
        );
    }
    println!();

    println!(
        "{} curated model to {}",
        "Saved".green().bold(),
        output_dir.display().to_string().cyan()
    );
    if reports {
        println!("Reports written alongside the model.");
    }

    Ok(())
}
