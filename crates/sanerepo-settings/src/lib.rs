//! Settings parsing and partition resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves settings provided as strings.
//! Reading `.sanerepo.json` from disk is the repo adapter's job.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::SaneRepoSettingsV1;
pub use resolve::resolve_partitions;

use anyhow::{Context, bail};
use serde_json::Value;

/// Schema reference field; must be a string when present.
const SCHEMA_FIELD: &str = "$schema";

/// Fields that must be arrays of strings when present.
const PARTITION_FIELDS: &[&str] = &["esmOnly", "cjsOnly"];

/// Parse `.sanerepo.json` into a typed model.
///
/// The document must be a JSON object. `esmOnly` and `cjsOnly` must be arrays of strings;
/// `$schema` must be a string. `null` counts as absent. Other keys are ignored.
pub fn parse_settings_json(input: &str) -> anyhow::Result<SaneRepoSettingsV1> {
    let value: Value = serde_json::from_str(input).context("settings are not valid JSON")?;
    let Value::Object(map) = &value else {
        bail!("expected a JSON object at the top level");
    };

    match map.get(SCHEMA_FIELD) {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => bail!("{SCHEMA_FIELD}: expected a string"),
    }

    for field in PARTITION_FIELDS {
        match map.get(*field) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                if let Some(idx) = items.iter().position(|item| !item.is_string()) {
                    bail!("{field}[{idx}]: expected a string");
                }
            }
            Some(_) => bail!("{field}: expected an array of strings"),
        }
    }

    let cfg: SaneRepoSettingsV1 = serde_json::from_value(value)?;
    Ok(cfg)
}

/// JSON schema of the settings file.
pub fn settings_schema() -> schemars::Schema {
    schemars::schema_for!(SaneRepoSettingsV1)
}
