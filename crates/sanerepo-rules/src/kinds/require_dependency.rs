use super::{invalid, validate_scope};
use sanerepo_types::{
    DependencyRequirements, PackageFilter, Result, RuleDescriptor, RuleKind, RuleOptions,
};

/// The package must declare these dependencies with exactly these ranges.
pub fn require_dependency(
    scope: PackageFilter,
    requirements: DependencyRequirements,
) -> Result<RuleDescriptor> {
    validate_scope(RuleKind::RequireDependency, &scope)?;

    if requirements.is_empty() {
        return Err(invalid(RuleKind::RequireDependency, "no dependencies given"));
    }
    let all = requirements
        .dependencies
        .iter()
        .chain(requirements.dev_dependencies.iter());
    for (name, range) in all {
        if name.trim().is_empty() {
            return Err(invalid(RuleKind::RequireDependency, "dependency name is empty"));
        }
        if range.trim().is_empty() {
            return Err(invalid(
                RuleKind::RequireDependency,
                format!("dependency '{name}' has an empty version range"),
            ));
        }
    }

    Ok(RuleDescriptor::new(
        scope,
        RuleOptions::RequireDependency(requirements),
    ))
}
