//! The `settings` use case: show the effective partitions.

use anyhow::Context;
use sanerepo_rules::PartitionConfig;
use sanerepo_settings::SaneRepoSettingsV1;

/// The partitions as a settings document, both lists spelled out.
pub fn settings_document(partitions: &PartitionConfig) -> SaneRepoSettingsV1 {
    SaneRepoSettingsV1 {
        schema: None,
        esm_only: Some(partitions.esm_only.clone()),
        cjs_only: Some(partitions.cjs_only.clone()),
    }
}

pub fn settings_json(partitions: &PartitionConfig) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(&settings_document(partitions))
        .context("serialize settings")?;
    json.push('\n');
    Ok(json)
}
