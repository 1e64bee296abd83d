//! Results and audit records of a curation run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::directive::{DirectiveOperation, DirectiveSource};
use crate::model::{EntityKind, StoreCounts};

/// Why a directive changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The target identifier is not in the collection.
    MissingTarget,
    /// The target exists but the directive asks for nothing new.
    NoChange,
}

impl SkipReason {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::MissingTarget => "target not found",
            SkipReason::NoChange => "no change",
        }
    }
}

/// Result of one directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DirectiveStatus {
    Applied,
    Skipped(SkipReason),
}

impl DirectiveStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, DirectiveStatus::Applied)
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DirectiveStatus::Applied => "applied",
            DirectiveStatus::Skipped(reason) => reason.label(),
        }
    }
}

/// Audit information for a single directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveAudit {
    pub entity: EntityKind,

    /// Identifier the directive addressed.
    pub target: String,

    pub operation: DirectiveOperation,

    pub status: DirectiveStatus,

    /// Whether a rename folded the target into an existing entity.
    #[serde(default)]
    pub merged: bool,

    /// Reactions removed by the cascade.
    #[serde(default)]
    pub reactions_removed: usize,

    /// Reactions edited by the cascade.
    #[serde(default)]
    pub reactions_modified: usize,

    /// Reference values added or removed (metabolites only).
    #[serde(default)]
    pub references_changed: usize,
}

impl DirectiveAudit {
    /// Get a human-readable description of what happened.
    pub fn description(&self) -> String {
        let mut text = format!(
            "{} '{}': {}",
            self.entity,
            self.target,
            self.operation.description()
        );
        if self.merged {
            text.push_str(" (merged)");
        }
        if self.reactions_removed > 0 {
            text.push_str(&format!(", {} reaction(s) removed", self.reactions_removed));
        }
        if self.reactions_modified > 0 {
            text.push_str(&format!(", {} reaction(s) modified", self.reactions_modified));
        }
        if self.references_changed > 0 {
            text.push_str(&format!(", {} reference(s) changed", self.references_changed));
        }
        text
    }
}

/// Result of one curation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub entity: EntityKind,

    /// Number of directives applied.
    pub applied: usize,

    /// Number of directives skipped.
    pub skipped: usize,

    /// One audit per directive, in directive order.
    pub audits: Vec<DirectiveAudit>,
}

impl StageOutcome {
    /// Create an empty outcome.
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            applied: 0,
            skipped: 0,
            audits: Vec::new(),
        }
    }

    /// Add an audit to the outcome.
    pub fn record(&mut self, audit: DirectiveAudit) {
        if audit.status.is_applied() {
            self.applied += 1;
        } else {
            self.skipped += 1;
        }
        self.audits.push(audit);
    }

    /// Reactions removed across the stage.
    pub fn reactions_removed(&self) -> usize {
        self.audits.iter().map(|a| a.reactions_removed).sum()
    }
}

/// Counts describing a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationSummary {
    /// Collection sizes before curation.
    pub before: StoreCounts,
    /// Collection sizes after curation.
    pub after: StoreCounts,
    /// Directives seen.
    pub directives: usize,
    pub applied: usize,
    pub skipped: usize,
    /// Net decrease of the reaction collection, from cascades, deletes and
    /// merges alike.
    pub reactions_removed: usize,
    /// Replicate entries pruned by the integrity filter.
    pub replicates_pruned: usize,
}

/// Full record of a curation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationOutcome {
    /// Directive files the run consumed, with their digests.
    #[serde(default)]
    pub sources: Vec<DirectiveSource>,
    /// Stage outcomes in execution order.
    pub stages: Vec<StageOutcome>,
    pub summary: CurationSummary,
    pub completed_at: DateTime<Utc>,
}

impl CurationOutcome {
    /// Outcome of one stage.
    pub fn stage(&self, entity: EntityKind) -> Option<&StageOutcome> {
        self.stages.iter().find(|s| s.entity == entity)
    }

    /// Every audit across all stages, in execution order.
    pub fn audits(&self) -> impl Iterator<Item = &DirectiveAudit> {
        self.stages.iter().flat_map(|s| s.audits.iter())
    }
}
