//! Stable contracts shared across the sanerepo workspace.
//!
//! This crate is intentionally boring:
//! - rule descriptors and the vocabulary of rule kinds handed to the enforcement engine
//! - the `Host` / `WorkspaceContext` capabilities the core consumes
//! - the error taxonomy
//! - canonical package-relative path handling

#![forbid(unsafe_code)]

pub mod error;
pub mod host;
pub mod ids;
pub mod path;
pub mod rule;

pub use error::{Result, SaneRepoError};
pub use host::{Host, WorkspaceContext};
pub use path::RepoPath;
pub use rule::{
    ContentGenerator, DependencyRequirements, FileContent, GeneratorDescriptor, PackageFilter,
    RuleDescriptor, RuleKind, RuleList, RuleOptions, ScriptExpectation,
};
