//! Curation run configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::directive::DELETE_MARKER;
use crate::error::{CurationError, Result};
use crate::model::EntityKind;

use super::policy::{CascadePolicies, CascadePolicy};

/// Configuration for a curation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurationConfig {
    /// Cascade behavior per entity type.
    pub policies: CascadePolicies,

    /// Value of `identifier_novel` that requests a delete.
    pub delete_marker: String,

    /// Prune replicate entries that name missing reactions after the
    /// reaction stage.
    pub filter_replicates: bool,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            policies: CascadePolicies::default(),
            delete_marker: DELETE_MARKER.to_string(),
            filter_replicates: true,
        }
    }
}

impl CurationConfig {
    pub fn with_policy(mut self, kind: EntityKind, policy: CascadePolicy) -> Self {
        self.policies.set(kind, policy);
        self
    }

    pub fn with_delete_marker(mut self, marker: impl Into<String>) -> Self {
        self.delete_marker = marker.into();
        self
    }

    pub fn with_filter_replicates(mut self, enabled: bool) -> Self {
        self.filter_replicates = enabled;
        self
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| CurationError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: CurationConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.delete_marker.trim().is_empty() {
            return Err(CurationError::Config(
                "delete_marker must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
