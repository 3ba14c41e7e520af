//! JSON Schema of the configuration file.

use crate::config::PanesConfig;

/// Identifier embedded in the generated schema.
pub const SCHEMA_ID: &str = "https://raw.githubusercontent.com/panes-rs/panes/main/panes.schema.json";

/// Generates the JSON Schema for [`PanesConfig`].
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(PanesConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Pretty-printed JSON of [`generate_schema`].
#[must_use]
pub fn generate_schema_json() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}
