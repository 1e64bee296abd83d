//! Persistence for entity stores - one JSON file per collection.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CurationError, Result};

use super::entity::EntityKind;
use super::store::EntityStore;

impl EntityStore {
    /// Save every collection as `<collection>.json` inside a directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use metacurate::EntityStore;
    /// # fn example(store: &EntityStore) -> metacurate::Result<()> {
    /// store.save_dir("model/curation")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save_dir(&self, directory: impl AsRef<Path>) -> Result<()> {
        let directory = directory.as_ref();

        if !directory.exists() {
            fs::create_dir_all(directory).map_err(|e| {
                CurationError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    directory.display(),
                    e
                ))
            })?;
        }

        save_json(&collection_path(directory, EntityKind::Compartment), &self.compartments)?;
        save_json(&collection_path(directory, EntityKind::Process), &self.processes)?;
        save_json(&collection_path(directory, EntityKind::Metabolite), &self.metabolites)?;
        save_json(&collection_path(directory, EntityKind::Reaction), &self.reactions)?;

        Ok(())
    }

    /// Load a store previously written by [`EntityStore::save_dir`].
    ///
    /// All four collection files must be present.
    pub fn load_dir(directory: impl AsRef<Path>) -> Result<Self> {
        let directory = directory.as_ref();

        Ok(Self {
            compartments: load_json(&collection_path(directory, EntityKind::Compartment))?,
            processes: load_json(&collection_path(directory, EntityKind::Process))?,
            metabolites: load_json(&collection_path(directory, EntityKind::Metabolite))?,
            reactions: load_json(&collection_path(directory, EntityKind::Reaction))?,
        })
    }
}

/// Path of one collection's file inside a model directory.
///
/// # Example
///
/// ```
/// use metacurate::model::{collection_path, EntityKind};
///
/// let path = collection_path("model", EntityKind::Metabolite);
/// assert_eq!(path.to_string_lossy(), "model/metabolites.json");
/// ```
pub fn collection_path(directory: impl AsRef<Path>, kind: EntityKind) -> PathBuf {
    directory
        .as_ref()
        .join(format!("{}.json", kind.plural()))
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        CurationError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value).map_err(|e| {
        CurationError::Persistence(format!(
            "Failed to serialize '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| CurationError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        CurationError::Persistence(format!(
            "Failed to parse '{}': {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Compartment, Metabolite, Participant, Reaction};
    use tempfile::TempDir;

    #[test]
    fn test_collection_path() {
        assert_eq!(
            collection_path("data/model", EntityKind::Reaction).to_string_lossy(),
            "data/model/reactions.json"
        );
    }

    #[test]
    fn test_save_creates_directory_and_reloads() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("curation");
        let store = EntityStore::new()
            .with_compartment(Compartment::new("c", "cytosol"))
            .with_metabolite(Metabolite::new("M1", "glucose").with_reference("hmdb", "HMDB0000122"))
            .with_reaction(Reaction::new("R1", "uptake").with_participant(Participant::reactant("M1", "c")));

        store.save_dir(&target).unwrap();
        let loaded = EntityStore::load_dir(&target).unwrap();

        assert_eq!(loaded, store);
    }

    #[test]
    fn test_load_missing_collection_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = EntityStore::load_dir(dir.path()).unwrap_err();

        assert!(matches!(err, CurationError::Io { .. }));
    }
}
