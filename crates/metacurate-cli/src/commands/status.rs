//! Status command - collection counts and integrity of a model.

use std::path::PathBuf;

use colored::Colorize;
use metacurate::model::ViolationKind;
use metacurate::{EntityKind, EntityStore};

pub fn run(model: PathBuf, json_output: bool, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !model.is_dir() {
        return Err(format!("Model directory not found: {}", model.display()).into());
    }

    let store = EntityStore::load_dir(&model)?;
    let counts = store.counts();
    let violations = store.integrity_violations();

    if json_output {
        let status = serde_json::json!({
            "model": model.display().to_string(),
            "counts": counts,
            "violations": violations.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
            "is_consistent": violations.is_empty(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Model status for".cyan().bold(),
        model.display().to_string().white()
    );
    println!();

    println!("{}", "Collections:".yellow().bold());
    for kind in EntityKind::ALL {
        println!("  {:<12} {}", kind.plural(), counts.get(kind).to_string().white().bold());
    }
    println!();

    if violations.is_empty() {
        println!("{}", "No integrity violations.".green().bold());
        return Ok(());
    }

    println!(
        "{} {}",
        "Integrity violations:".yellow().bold(),
        violations.len().to_string().red()
    );
    for violation in &violations {
        let line = violation.to_string();
        // Dangling processes are expected after process deletes.
        if violation.kind == ViolationKind::DanglingProcess {
            println!("  {}", line.dimmed());
        } else {
            println!("  {}", line.red());
        }
    }

    Ok(())
}
