use crate::utils::error::{MaintenanceError, Result};
use jsonschema::Validator;
use serde_json::Value;
use std::sync::LazyLock;

/// The `maintenance` schema document, packaged with the crate.
pub const MAINTENANCE_SCHEMA: &str = include_str!("../../schemas/maintenance.json");

static VALIDATOR: LazyLock<std::result::Result<Validator, String>> = LazyLock::new(compile);

fn compile() -> std::result::Result<Validator, String> {
    let document: Value = serde_json::from_str(MAINTENANCE_SCHEMA).map_err(|e| e.to_string())?;
    jsonschema::validator_for(&document).map_err(|e| e.to_string())
}

/// Check raw report data against the `maintenance` schema.
pub fn validate(instance: &Value) -> Result<()> {
    let validator = VALIDATOR.as_ref().map_err(|e| MaintenanceError::ConfigError {
        message: format!("maintenance schema failed to load: {}", e),
    })?;

    validator
        .validate(instance)
        .map_err(|e| MaintenanceError::invalid_data(e.to_string()))
}
