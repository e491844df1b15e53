//! Repository adapters: locate the workspace, enumerate its members, load settings.
//!
//! This crate is allowed to do filesystem IO (reads only). It never spawns processes and
//! never consults the process working directory; callers pass the start directory.

#![forbid(unsafe_code)]

mod context;
mod host;
mod locate;
mod members;
mod settings;

pub use context::{FsWorkspaceContext, MemoryWorkspaceContext};
pub use host::{FsHost, MemoryHost};
pub use locate::{WorkspaceMarker, WorkspaceRoot, locate};
pub use members::{MemberSelector, discover_members, member_patterns, select_members};
pub use settings::{load_settings, load_settings_from};

/// Fuzz-friendly API for exercising manifest parsing without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use camino::Utf8Path;

    /// Parse arbitrary text as `pnpm-workspace.yaml` and return its member patterns.
    pub fn parse_pnpm_workspace(text: &str) -> anyhow::Result<Vec<String>> {
        Ok(crate::members::parse_pnpm_workspace(text)?)
    }

    /// Select member directories (root-relative) from `candidates` using `patterns`.
    pub fn select_members(
        patterns: &[String],
        candidates: &[String],
    ) -> anyhow::Result<Vec<String>> {
        let selector = crate::members::MemberSelector::new(patterns)?;
        let root = Utf8Path::new("/fuzz");
        let picked = crate::members::select_members(
            root,
            &selector,
            candidates.iter().map(|c| root.join(c)),
        );
        Ok(picked
            .into_iter()
            .filter_map(|p| p.strip_prefix(root).ok().map(|r| r.as_str().to_string()))
            .collect())
    }
}
