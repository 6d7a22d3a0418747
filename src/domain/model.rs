use crate::utils::error::{MaintenanceError, Result};
use crate::utils::iso_time_now;
use crate::utils::validation::{validate_non_empty_string, validate_timestamp, Validate};
use std::collections::HashSet;

/// One repository in maintenance mode: who put it there, why, and since when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceEntry {
    /// ID of the repository. Whether it exists is not checked.
    pub repo_id: String,
    pub message: Option<String>,
    pub owner: Option<String>,
    /// UTC, e.g. `2019-08-15T14:21:12Z`.
    pub started: String,
}

impl MaintenanceEntry {
    /// A new entry starting now, with no message or owner.
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            message: None,
            owner: None,
            started: iso_time_now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_started(mut self, started: impl Into<String>) -> Self {
        self.started = started.into();
        self
    }
}

impl Validate for MaintenanceEntry {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("repo_id", &self.repo_id)?;
        validate_timestamp("started", &self.started)
    }
}

/// The maintenance status of a set of repositories.
///
/// Repositories listed here are blocked from external publishing; other
/// operations on them remain possible. A report is never modified: `add` and
/// `remove` return a new report and leave the receiver untouched.
///
/// Every constructor checks that each `repo_id` appears at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceReport {
    last_updated: String,
    last_updated_by: Option<String>,
    entries: Vec<MaintenanceEntry>,
}

impl Default for MaintenanceReport {
    /// An empty report last updated now, by nobody.
    fn default() -> Self {
        Self {
            last_updated: iso_time_now(),
            last_updated_by: None,
            entries: Vec::new(),
        }
    }
}

impl MaintenanceReport {
    pub fn new(
        last_updated: impl Into<String>,
        last_updated_by: Option<String>,
        entries: Vec<MaintenanceEntry>,
    ) -> Result<Self> {
        let report = Self {
            last_updated: last_updated.into(),
            last_updated_by,
            entries,
        };
        report.validate()?;
        Ok(report)
    }

    /// A copy of this report with some fields replaced, re-validated.
    pub(crate) fn evolve(
        &self,
        last_updated: Option<String>,
        last_updated_by: Option<String>,
        entries: Vec<MaintenanceEntry>,
    ) -> Result<Self> {
        Self::new(
            last_updated.unwrap_or_else(|| self.last_updated.clone()),
            last_updated_by.or_else(|| self.last_updated_by.clone()),
            entries,
        )
    }

    /// When this report was last updated, in UTC.
    pub fn last_updated(&self) -> &str {
        &self.last_updated
    }

    /// Person or party who last updated the report.
    pub fn last_updated_by(&self) -> Option<&str> {
        self.last_updated_by.as_deref()
    }

    /// Repositories in maintenance mode. Empty means none are.
    pub fn entries(&self) -> &[MaintenanceEntry] {
        &self.entries
    }

    pub fn get(&self, repo_id: &str) -> Option<&MaintenanceEntry> {
        self.entries.iter().find(|entry| entry.repo_id == repo_id)
    }

    pub fn contains(&self, repo_id: &str) -> bool {
        self.get(repo_id).is_some()
    }

    pub fn repo_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.repo_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Validate for MaintenanceReport {
    fn validate(&self) -> Result<()> {
        validate_timestamp("last_updated", &self.last_updated)?;

        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for entry in &self.entries {
            entry.validate()?;
            if !seen.insert(entry.repo_id.as_str()) && !duplicates.contains(&entry.repo_id) {
                duplicates.push(entry.repo_id.clone());
            }
        }

        if !duplicates.is_empty() {
            return Err(MaintenanceError::DuplicateEntries {
                repo_ids: duplicates,
            });
        }
        Ok(())
    }
}
