//! One builder per rule kind.
//!
//! Builders validate options before a descriptor exists, so the engine never receives a
//! rule it cannot act on.

use sanerepo_types::{PackageFilter, RuleKind, SaneRepoError};

mod file_contents;
mod ordering;
mod package_entry;
mod package_script;
mod require_dependency;
mod standard_tsconfig;

pub use file_contents::file_contents;
pub use ordering::{alphabetical_dependencies, alphabetical_scripts, package_order};
pub use package_entry::package_entry;
pub use package_script::package_script;
pub use require_dependency::require_dependency;
pub use standard_tsconfig::standard_tsconfig;

pub(crate) fn invalid(kind: RuleKind, reason: impl Into<String>) -> SaneRepoError {
    SaneRepoError::InvalidRule {
        kind: kind.as_str(),
        reason: reason.into(),
    }
}

/// An explicit include list must name at least one package; use `PackageFilter::all()`
/// for "every package".
pub(crate) fn validate_scope(kind: RuleKind, scope: &PackageFilter) -> Result<(), SaneRepoError> {
    if let Some(include) = &scope.include_packages {
        if include.is_empty() {
            return Err(invalid(kind, "include list is empty"));
        }
        if include.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid(kind, "include list has an empty package name"));
        }
    }
    if scope.exclude_packages.iter().any(|p| p.trim().is_empty()) {
        return Err(invalid(kind, "exclude list has an empty package name"));
    }
    Ok(())
}
