use camino::Utf8Path;
use sanerepo_rules::PartitionConfig;
use sanerepo_types::ids::SETTINGS_FILE;
use sanerepo_types::{Host, Result, SaneRepoError};
use std::io;

/// Load `.sanerepo.json` from the workspace root.
pub fn load_settings(host: &dyn Host, workspace_root: &Utf8Path) -> Result<PartitionConfig> {
    load_settings_from(host, workspace_root, SETTINGS_FILE)
}

/// Load partitions from `file_name` under the workspace root.
///
/// A missing file means both partitions are empty. Package names are not checked against
/// the workspace.
pub fn load_settings_from(
    host: &dyn Host,
    workspace_root: &Utf8Path,
    file_name: &str,
) -> Result<PartitionConfig> {
    let path = workspace_root.join(file_name);
    let text = match host.read_file(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(settings = %path, "no settings file; partitions are empty");
            return Ok(PartitionConfig::default());
        }
        Err(e) => return Err(SaneRepoError::io(path, e)),
    };

    let partitions = sanerepo_settings::parse_settings_json(&text)
        .and_then(sanerepo_settings::resolve_partitions)
        .map_err(|e| SaneRepoError::InvalidSettings {
            path: path.clone(),
            reason: format!("{e:#}"),
        })?;

    tracing::debug!(
        settings = %path,
        esm_only = partitions.esm_only.len(),
        cjs_only = partitions.cjs_only.len(),
        "loaded settings"
    );
    Ok(partitions)
}
