//! JSON Schemas for the configuration and scenario files.

use crate::config::LumenConfig;
use crate::scenario::Scenario;

/// Base URL the schemas are published under.
const SCHEMA_BASE_URL: &str = "https://raw.githubusercontent.com/lumen-web/lumen/main";

/// Inserts `$id` so editors can identify the schema.
fn with_id(mut schema: schemars::Schema, file: &str) -> schemars::Schema {
    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(format!("{SCHEMA_BASE_URL}/{file}")));
    }
    schema
}

/// Generates a JSON Schema for the Lumen configuration.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    with_id(schemars::schema_for!(LumenConfig), "lumen.schema.json")
}

/// Generates a JSON Schema for scenario files.
#[must_use]
pub fn generate_scenario_schema() -> schemars::Schema {
    with_id(schemars::schema_for!(Scenario), "scenario.schema.json")
}

/// Pretty-printed configuration schema.
#[must_use]
pub fn generate_schema_json() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}

/// Pretty-printed scenario schema.
#[must_use]
pub fn generate_scenario_schema_json() -> String {
    serde_json::to_string_pretty(&generate_scenario_schema()).unwrap_or_default()
}
