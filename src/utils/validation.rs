use crate::utils::error::{MaintenanceError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Wire format of every timestamp in a report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Same pattern as `definitions.timestamp` in `schemas/maintenance.json`.
pub const TIMESTAMP_PATTERN: &str =
    "^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])T([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]Z$";

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(TIMESTAMP_PATTERN).unwrap_or_else(|e| panic!("invalid timestamp pattern: {e}"))
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MaintenanceError::ValidationError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_timestamp(field_name: &str, value: &str) -> Result<()> {
    if !TIMESTAMP_RE.is_match(value) {
        return Err(MaintenanceError::ValidationError {
            field: field_name.to_string(),
            message: format!("'{}' is not a UTC timestamp like 2019-08-15T14:21:12Z", value),
        });
    }
    Ok(())
}
