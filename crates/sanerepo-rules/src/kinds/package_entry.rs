use super::{invalid, validate_scope};
use sanerepo_types::{PackageFilter, Result, RuleDescriptor, RuleKind, RuleOptions};
use serde_json::Value;
use std::collections::BTreeMap;

/// The package's `package.json` must carry these top-level entries.
pub fn package_entry(
    scope: PackageFilter,
    entries: BTreeMap<String, Value>,
) -> Result<RuleDescriptor> {
    validate_scope(RuleKind::PackageEntry, &scope)?;

    if entries.is_empty() {
        return Err(invalid(RuleKind::PackageEntry, "no entries given"));
    }
    if let Some(key) = entries.keys().find(|k| k.trim().is_empty()) {
        return Err(invalid(
            RuleKind::PackageEntry,
            format!("entry key '{key}' is empty"),
        ));
    }

    Ok(RuleDescriptor::new(scope, RuleOptions::PackageEntry { entries }))
}
