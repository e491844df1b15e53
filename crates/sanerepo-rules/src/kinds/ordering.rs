//! Ordering rules carry no options; the scope is all they need.

use sanerepo_types::{PackageFilter, RuleDescriptor, RuleOptions};

/// Top-level `package.json` keys in canonical order.
pub fn package_order(scope: PackageFilter) -> RuleDescriptor {
    RuleDescriptor::new(scope, RuleOptions::PackageOrder)
}

/// Every dependency block sorted alphabetically.
pub fn alphabetical_dependencies(scope: PackageFilter) -> RuleDescriptor {
    RuleDescriptor::new(scope, RuleOptions::AlphabeticalDependencies)
}

/// The `scripts` block sorted alphabetically.
pub fn alphabetical_scripts(scope: PackageFilter) -> RuleDescriptor {
    RuleDescriptor::new(scope, RuleOptions::AlphabeticalScripts)
}
