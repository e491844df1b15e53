use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `.sanerepo.json` schema v1.
///
/// This is a *user-facing* model: unknown keys are ignored so the file can grow without
/// breaking older binaries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SaneRepoSettingsV1 {
    /// Optional JSON schema reference for editors.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Packages that ship only a module build.
    #[serde(rename = "esmOnly", default, skip_serializing_if = "Option::is_none")]
    pub esm_only: Option<Vec<String>>,

    /// Packages that ship only a CommonJS build.
    #[serde(rename = "cjsOnly", default, skip_serializing_if = "Option::is_none")]
    pub cjs_only: Option<Vec<String>>,
}
