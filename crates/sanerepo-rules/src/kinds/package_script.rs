use super::{invalid, validate_scope};
use sanerepo_types::{
    PackageFilter, Result, RuleDescriptor, RuleKind, RuleOptions, ScriptExpectation,
};
use std::collections::BTreeMap;

/// The package's `scripts` must match these expectations (exact command or absent).
pub fn package_script(
    scope: PackageFilter,
    scripts: BTreeMap<String, ScriptExpectation>,
) -> Result<RuleDescriptor> {
    validate_scope(RuleKind::PackageScript, &scope)?;

    if scripts.is_empty() {
        return Err(invalid(RuleKind::PackageScript, "no scripts given"));
    }
    for (name, expectation) in &scripts {
        if name.trim().is_empty() {
            return Err(invalid(RuleKind::PackageScript, "script name is empty"));
        }
        if let ScriptExpectation::Exact(cmd) = expectation
            && cmd.trim().is_empty()
        {
            return Err(invalid(
                RuleKind::PackageScript,
                format!("script '{name}' has an empty command; use Absent to forbid it"),
            ));
        }
    }

    Ok(RuleDescriptor::new(scope, RuleOptions::PackageScript { scripts }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_rejected() {
        let mut scripts = BTreeMap::new();
        scripts.insert("build".to_string(), ScriptExpectation::from("  "));
        let err = package_script(PackageFilter::all(), scripts).unwrap_err();
        assert!(err.to_string().contains("build"));
    }

    #[test]
    fn absent_expectation_is_allowed() {
        let mut scripts = BTreeMap::new();
        scripts.insert("check:jest".to_string(), ScriptExpectation::Absent);
        assert!(package_script(PackageFilter::all(), scripts).is_ok());
    }

    #[test]
    fn explicit_empty_scope_is_rejected() {
        let mut scripts = BTreeMap::new();
        scripts.insert("build".to_string(), ScriptExpectation::from("tsup"));
        let err = package_script(PackageFilter::only(Vec::<String>::new()), scripts).unwrap_err();
        assert_eq!(err.code(), "invalid_rule");
    }
}
