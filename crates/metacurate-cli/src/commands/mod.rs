//! CLI command implementations.

pub mod curate;
pub mod diff;
pub mod status;

use std::path::{Path, PathBuf};

use colored::Colorize;
use metacurate::directive::DirectiveSource;
use metacurate::{CurationConfig, DirectiveReader, DirectiveSet, EntityKind, EntityStore, StageOutcome};

/// Load the configuration file, or defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<CurationConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(CurationConfig::load(path)?),
        None => Ok(CurationConfig::default()),
    }
}

/// Load a model and the directives to apply to it.
pub fn load_inputs(
    model: &Path,
    directives: &Path,
    config: &CurationConfig,
) -> Result<(EntityStore, DirectiveSet), Box<dyn std::error::Error>> {
    if !model.is_dir() {
        return Err(format!("Model directory not found: {}", model.display()).into());
    }
    if !directives.is_dir() {
        return Err(format!("Directive directory not found: {}", directives.display()).into());
    }

    let store = EntityStore::load_dir(model)?;
    let set = DirectiveReader::new()
        .with_delete_marker(config.delete_marker.clone())
        .load_dir(directives)?;
    Ok((store, set))
}

/// Default output directory: a `curation` sibling of the model directory.
pub fn default_output(model: &Path) -> PathBuf {
    match model.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join("curation"),
        _ => PathBuf::from("curation"),
    }
}

/// Print one line per stage with applied and skipped counts.
pub fn print_stages(stages: &[StageOutcome]) {
    println!("{}", "Stages:".yellow().bold());
    for stage in stages {
        let removed = match stage.reactions_removed() {
            0 => String::new(),
            n => format!(", {} reaction(s) removed", n.to_string().red()),
        };
        println!(
            "  {:<12} {} applied, {} skipped{}",
            capitalize(stage.entity),
            stage.applied.to_string().green(),
            stage.skipped.to_string().yellow(),
            removed
        );
    }
}

/// Print the directive files a run read, with their digests.
pub fn print_sources(sources: &[DirectiveSource]) {
    if sources.is_empty() {
        return;
    }
    println!("{}", "Directive files:".yellow().bold());
    for source in sources {
        println!(
            "  {:<12} {} ({} rows, {})",
            source.entity.plural(),
            source.table.path.display(),
            source.table.rows,
            source.table.short_digest(12).dimmed()
        );
    }
}

fn capitalize(kind: EntityKind) -> String {
    let plural = kind.plural();
    let mut chars = plural.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_is_sibling() {
        assert_eq!(
            default_output(Path::new("data/model/enhancement")),
            PathBuf::from("data/model/curation")
        );
        assert_eq!(default_output(Path::new("enhancement")), PathBuf::from("curation"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize(EntityKind::Process), "Processes");
    }
}
