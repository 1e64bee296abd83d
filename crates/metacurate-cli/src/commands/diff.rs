//! Diff command - preview what a directive set would do.

use std::path::PathBuf;

use colored::Colorize;
use metacurate::{Curator, DirectiveStatus};

use super::{load_config, load_inputs, print_stages};

pub fn run(
    model: PathBuf,
    directives: PathBuf,
    config: Option<PathBuf>,
    changed_only: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config.as_deref())?;
    let (store, set) = load_inputs(&model, &directives, &config)?;

    if set.is_empty() {
        println!("{}", "No directives to preview.".yellow());
        return Ok(());
    }

    println!(
        "{} {} directives",
        "Previewing".cyan().bold(),
        set.len().to_string().white().bold()
    );
    println!();

    let result = Curator::with_config(config).curate(&store, &set);

    for stage in &result.outcome.stages {
        for audit in &stage.audits {
            let status = match audit.status {
                DirectiveStatus::Applied => "APPLY".green(),
                DirectiveStatus::Skipped(_) if changed_only => continue,
                DirectiveStatus::Skipped(reason) => format!("SKIP ({})", reason.label()).yellow(),
            };
            println!("  {} {}", status, audit.description());
        }
    }

    println!();
    print_stages(&result.outcome.stages);
    if result.outcome.summary.replicates_pruned > 0 {
        println!(
            "  Replicate filter would prune {} reference(s)",
            result.outcome.summary.replicates_pruned.to_string().yellow()
        );
    }

    println!();
    println!(
        "Run {} to apply these changes.",
        format!(
            "metacurate curate {} --directives {}",
            model.display(),
            directives.display()
        )
        .cyan()
        .bold()
    );

    Ok(())
}
