use crate::config::Defaults;
use crate::domain::model::{MaintenanceEntry, MaintenanceReport};
use crate::utils::error::Result;
use crate::utils::iso_time_now;
use std::collections::HashSet;

/// Treat an empty string the same as no value.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Drop every entry whose `repo_id` appears again later in the list.
fn keep_last_by_repo_id(entries: Vec<MaintenanceEntry>) -> Vec<MaintenanceEntry> {
    let mut seen = HashSet::new();
    let mut kept: Vec<MaintenanceEntry> = entries
        .into_iter()
        .rev()
        .filter(|entry| seen.insert(entry.repo_id.clone()))
        .collect();
    kept.reverse();
    kept
}

impl MaintenanceReport {
    /// Put repositories into maintenance mode, or refresh the entry of one
    /// already there. Uses [`Defaults::process`] for missing values.
    ///
    /// Returns a new report with `last_updated` set to now and
    /// `last_updated_by` set to the owner.
    pub fn add<I, S>(&self, repo_ids: I, message: Option<&str>, owner: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_with(Defaults::process(), repo_ids, message, owner)
    }

    /// [`add`](Self::add) with explicit defaults.
    pub fn add_with<I, S>(
        &self,
        defaults: &Defaults,
        repo_ids: I,
        message: Option<&str>,
        owner: Option<&str>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let message = non_empty(message).unwrap_or(&defaults.message);
        let owner = non_empty(owner).unwrap_or(&defaults.owner);
        let now = iso_time_now();

        let added: Vec<MaintenanceEntry> = repo_ids
            .into_iter()
            .map(|repo_id| MaintenanceEntry {
                repo_id: repo_id.into(),
                message: Some(message.to_string()),
                owner: Some(owner.to_string()),
                started: now.clone(),
            })
            .collect();
        let added_count = added.len();

        // A newer entry for the same repository replaces the older one.
        let entries = keep_last_by_repo_id(self.entries().iter().cloned().chain(added).collect());

        tracing::debug!(
            added = added_count,
            total = entries.len(),
            owner,
            "Repositories put into maintenance mode"
        );

        self.evolve(Some(now), Some(owner.to_string()), entries)
    }

    /// Take repositories out of maintenance mode. Uses [`Defaults::process`]
    /// when no owner is given.
    ///
    /// `last_updated` is left as it was; `last_updated_by` is set to the owner
    /// even if none of `repo_ids` were in the report.
    pub fn remove<I, S>(&self, repo_ids: I, owner: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.remove_with(Defaults::process(), repo_ids, owner)
    }

    /// [`remove`](Self::remove) with explicit defaults.
    pub fn remove_with<I, S>(&self, defaults: &Defaults, repo_ids: I, owner: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let owner = non_empty(owner).unwrap_or(&defaults.owner);
        let to_remove: HashSet<String> = repo_ids
            .into_iter()
            .map(|repo_id| repo_id.as_ref().to_string())
            .collect();

        let entries: Vec<MaintenanceEntry> = self
            .entries()
            .iter()
            .filter(|entry| !to_remove.contains(&entry.repo_id))
            .cloned()
            .collect();

        tracing::debug!(
            removed = self.len() - entries.len(),
            total = entries.len(),
            owner,
            "Repositories taken out of maintenance mode"
        );

        self.evolve(None, Some(owner.to_string()), entries)
    }
}
