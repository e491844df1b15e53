use crate::model::SaneRepoSettingsV1;
use anyhow::bail;
use sanerepo_rules::PartitionConfig;

/// Turn parsed settings into the partitions the compiler consumes.
///
/// Missing lists are empty; duplicates within a list collapse to the first occurrence.
/// A package listed in both partitions is rejected.
pub fn resolve_partitions(cfg: SaneRepoSettingsV1) -> anyhow::Result<PartitionConfig> {
    let partitions = PartitionConfig::new(
        cfg.esm_only.unwrap_or_default(),
        cfg.cjs_only.unwrap_or_default(),
    );

    if let Some(name) = partitions.overlap() {
        bail!("package `{name}` is listed in both esmOnly and cjsOnly");
    }
    Ok(partitions)
}
