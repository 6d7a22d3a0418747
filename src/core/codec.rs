use crate::core::schema;
use crate::domain::model::{MaintenanceEntry, MaintenanceReport};
use crate::utils::error::{MaintenanceError, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

const TYPE_NAME: &str = "MaintenanceReport";

#[derive(Debug, Deserialize)]
struct RawEntry {
    message: Option<String>,
    owner: Option<String>,
    started: String,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    last_updated: String,
    last_updated_by: Option<String>,
    repos: BTreeMap<String, RawEntry>,
}

impl MaintenanceReport {
    /// Build a report from its raw form:
    ///
    /// ```json
    /// {
    ///     "last_updated": "2019-08-15T14:21:12Z",
    ///     "last_updated_by": "Content Delivery",
    ///     "repos": {
    ///         "repo1": {"message": "...", "owner": "...", "started": "2019-08-15T14:21:12Z"}
    ///     }
    /// }
    /// ```
    ///
    /// Entries are ordered by repository ID.
    ///
    /// # Errors
    ///
    /// [`MaintenanceError::InvalidData`] if `data` fails validation against the
    /// `maintenance` schema or the report invariants. Nothing is constructed
    /// in that case.
    pub fn from_data(data: &Value) -> Result<Self> {
        Self::decode(data).map_err(|err| {
            let err = match err {
                MaintenanceError::InvalidData { .. } => err,
                other => MaintenanceError::invalid_data(other.to_string()),
            };
            tracing::error!(error = %err, "{}.from_data invoked with invalid data", TYPE_NAME);
            err
        })
    }

    fn decode(data: &Value) -> Result<Self> {
        schema::validate(data)?;

        let raw = RawReport::deserialize(data)?;

        let entries = raw
            .repos
            .into_iter()
            .map(|(repo_id, details)| MaintenanceEntry {
                repo_id,
                message: details.message,
                owner: details.owner,
                started: details.started,
            })
            .collect();

        Self::new(raw.last_updated, raw.last_updated_by, entries)
    }

    /// Parse JSON text, then [`from_data`](Self::from_data).
    pub fn from_json_str(text: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(text).map_err(|e| {
            tracing::error!(error = %e, "{}.from_json_str invoked with malformed JSON", TYPE_NAME);
            MaintenanceError::invalid_data(e.to_string())
        })?;
        Self::from_data(&data)
    }

    /// The raw form accepted by [`from_data`](Self::from_data).
    pub fn export_dict(&self) -> Value {
        let repos: BTreeMap<&str, Value> = self
            .entries()
            .iter()
            .map(|entry| {
                (
                    entry.repo_id.as_str(),
                    json!({
                        "message": entry.message,
                        "owner": entry.owner,
                        "started": entry.started,
                    }),
                )
            })
            .collect();
        let repos: Map<String, Value> = repos
            .into_iter()
            .map(|(repo_id, details)| (repo_id.to_string(), details))
            .collect();

        json!({
            "last_updated": self.last_updated(),
            "last_updated_by": self.last_updated_by(),
            "repos": repos,
        })
    }

    /// JSON text as stored by the repository server: four-space indent, keys sorted.
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.export_dict().serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> Value {
        json!({
            "last_updated": "2019-08-15T14:21:12Z",
            "last_updated_by": "Content Delivery",
            "repos": {
                "repo2": {
                    "message": null,
                    "owner": null,
                    "started": "2019-08-15T14:00:00Z"
                },
                "repo1": {
                    "message": "Maintenance Mode Enabled",
                    "owner": "Content Delivery",
                    "started": "2019-08-15T14:21:12Z"
                }
            }
        })
    }

    #[test]
    fn test_from_data() {
        let report = MaintenanceReport::from_data(&raw()).unwrap();

        assert_eq!(report.last_updated(), "2019-08-15T14:21:12Z");
        assert_eq!(report.last_updated_by(), Some("Content Delivery"));
        assert_eq!(report.repo_ids().collect::<Vec<_>>(), vec!["repo1", "repo2"]);

        let repo1 = report.get("repo1").unwrap();
        assert_eq!(repo1.message.as_deref(), Some("Maintenance Mode Enabled"));
        assert_eq!(repo1.owner.as_deref(), Some("Content Delivery"));

        let repo2 = report.get("repo2").unwrap();
        assert_eq!(repo2.message, None);
        assert_eq!(repo2.started, "2019-08-15T14:00:00Z");
    }

    #[test]
    fn test_export_round_trip() {
        let data = raw();
        let report = MaintenanceReport::from_data(&data).unwrap();
        assert_eq!(report.export_dict(), data);
    }

    #[test]
    fn test_export_empty_report() {
        let report = MaintenanceReport::new("2020-01-01T00:00:00Z", None, Vec::new()).unwrap();
        assert_eq!(
            report.export_dict(),
            json!({
                "last_updated": "2020-01-01T00:00:00Z",
                "last_updated_by": null,
                "repos": {}
            })
        );
    }

    #[test]
    fn test_invalid_data_rejected() {
        let mut data = raw();
        data["repos"]["repo1"]
            .as_object_mut()
            .unwrap()
            .remove("started");

        let err = MaintenanceReport::from_data(&data).unwrap_err();
        assert!(err.is_invalid_data());
        assert!(err.to_string().contains("started"));
    }

    #[test]
    fn test_json_string_layout() {
        let report = MaintenanceReport::from_data(&raw()).unwrap();
        let text = report.to_json_string().unwrap();

        assert!(text.starts_with("{\n    \"last_updated\": \"2019-08-15T14:21:12Z\",\n"));
        assert!(text.find("\"repo1\"").unwrap() < text.find("\"repo2\"").unwrap());
        assert_eq!(MaintenanceReport::from_json_str(&text).unwrap(), report);
    }

    #[test]
    fn test_malformed_json_is_invalid_data() {
        let err = MaintenanceReport::from_json_str("{\"last_updated\": ").unwrap_err();
        assert!(err.is_invalid_data());
    }
}
