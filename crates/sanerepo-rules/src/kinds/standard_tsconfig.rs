use super::{invalid, validate_scope};
use sanerepo_types::{PackageFilter, Result, RuleDescriptor, RuleKind, RuleOptions};
use serde_json::Value;

/// The package's `tsconfig.json` must equal `template`.
pub fn standard_tsconfig(scope: PackageFilter, template: Value) -> Result<RuleDescriptor> {
    validate_scope(RuleKind::StandardTsconfig, &scope)?;

    if !template.is_object() {
        return Err(invalid(
            RuleKind::StandardTsconfig,
            "template must be a JSON object",
        ));
    }

    Ok(RuleDescriptor::new(
        scope,
        RuleOptions::StandardTsconfig { template },
    ))
}
