use camino::{Utf8Path, Utf8PathBuf};
use sanerepo_types::ids::{PACKAGE_MANIFEST, PNPM_WORKSPACE_MANIFEST};
use sanerepo_types::{Host, Result, SaneRepoError};
use serde_json::Value;
use std::fmt;
use std::io;

/// What identified a directory as the workspace root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkspaceMarker {
    /// `pnpm-workspace.yaml`.
    PnpmWorkspace,
    /// `package.json` with a `workspaces` field (npm / yarn).
    PackageJsonWorkspaces,
}

impl WorkspaceMarker {
    pub fn file_name(self) -> &'static str {
        match self {
            WorkspaceMarker::PnpmWorkspace => PNPM_WORKSPACE_MANIFEST,
            WorkspaceMarker::PackageJsonWorkspaces => PACKAGE_MANIFEST,
        }
    }
}

impl fmt::Display for WorkspaceMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceRoot {
    pub path: Utf8PathBuf,
    pub marker: WorkspaceMarker,
    /// `name` from the root `package.json`, when there is one.
    pub package_name: Option<String>,
}

impl WorkspaceRoot {
    /// The root package's name, or the root path when `package.json` declares none.
    pub fn root_package_name(&self) -> &str {
        self.package_name.as_deref().unwrap_or(self.path.as_str())
    }

    pub fn marker_path(&self) -> Utf8PathBuf {
        self.path.join(self.marker.file_name())
    }
}

/// Walk up from `start` (inclusive) to the nearest workspace root.
///
/// `pnpm-workspace.yaml` is checked before `package.json` at each level. A `package.json`
/// that cannot be parsed only fails the search when it belongs to the root; below the root
/// it is skipped so a broken member cannot hide the workspace above it.
pub fn locate(host: &dyn Host, start: &Utf8Path) -> Result<WorkspaceRoot> {
    for dir in start.ancestors() {
        let manifest_path = dir.join(PACKAGE_MANIFEST);

        let (marker, manifest) = if host.exists(&dir.join(PNPM_WORKSPACE_MANIFEST)) {
            (
                WorkspaceMarker::PnpmWorkspace,
                read_package_json(host, &manifest_path)?,
            )
        } else {
            let manifest = match read_package_json(host, &manifest_path) {
                Ok(manifest) => manifest,
                Err(err @ SaneRepoError::InvalidManifest { .. }) => {
                    tracing::warn!(
                        manifest = %manifest_path,
                        error = %err,
                        "skipping unreadable package.json"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            };
            match manifest {
                Some(m) if m.get("workspaces").is_some() => {
                    (WorkspaceMarker::PackageJsonWorkspaces, Some(m))
                }
                _ => continue,
            }
        };

        let package_name = manifest
            .as_ref()
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);
        tracing::debug!(root = %dir, %marker, "located workspace root");
        return Ok(WorkspaceRoot {
            path: dir.to_path_buf(),
            marker,
            package_name,
        });
    }

    Err(SaneRepoError::WorkspaceNotFound {
        start: start.to_path_buf(),
    })
}

/// `None` when the file does not exist.
pub(crate) fn read_package_json(host: &dyn Host, path: &Utf8Path) -> Result<Option<Value>> {
    match host.read_json(path) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(SaneRepoError::InvalidManifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        Err(e) => Err(SaneRepoError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryHost;
    use proptest::prelude::*;

    #[test]
    fn pnpm_marker_wins_and_reads_name() {
        let host = MemoryHost::new()
            .with_file("/repo/pnpm-workspace.yaml", "packages:\n  - packages/*\n")
            .with_file("/repo/package.json", r#"{"name": "my-root"}"#)
            .with_file("/repo/packages/a/package.json", r#"{"name": "a"}"#);

        let root = locate(&host, Utf8Path::new("/repo/packages/a/src")).expect("locate");
        assert_eq!(root.path.as_str(), "/repo");
        assert_eq!(root.marker, WorkspaceMarker::PnpmWorkspace);
        assert_eq!(root.root_package_name(), "my-root");
        assert_eq!(root.marker_path().as_str(), "/repo/pnpm-workspace.yaml");
    }

    #[test]
    fn package_json_workspaces_is_a_marker() {
        let host = MemoryHost::new()
            .with_file("/repo/package.json", r#"{"workspaces": ["packages/*"]}"#)
            .with_file("/repo/packages/a/package.json", r#"{"name": "a"}"#);

        let root = locate(&host, Utf8Path::new("/repo/packages/a")).expect("locate");
        assert_eq!(root.path.as_str(), "/repo");
        assert_eq!(root.marker, WorkspaceMarker::PackageJsonWorkspaces);
        assert_eq!(root.package_name, None);
        assert_eq!(root.root_package_name(), "/repo");
    }

    #[test]
    fn start_dir_itself_is_checked() {
        let host = MemoryHost::new().with_file("/repo/pnpm-workspace.yaml", "");
        let root = locate(&host, Utf8Path::new("/repo")).expect("locate");
        assert_eq!(root.path.as_str(), "/repo");
    }

    #[test]
    fn nothing_found_reports_start() {
        let host = MemoryHost::new().with_file("/repo/package.json", r#"{"name": "solo"}"#);
        let err = locate(&host, Utf8Path::new("/repo/src")).unwrap_err();
        match err {
            SaneRepoError::WorkspaceNotFound { start } => assert_eq!(start.as_str(), "/repo/src"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_package_json_is_invalid_manifest() {
        let host = MemoryHost::new()
            .with_file("/repo/pnpm-workspace.yaml", "")
            .with_file("/repo/package.json", "{ broken");
        let err = locate(&host, Utf8Path::new("/repo")).unwrap_err();
        assert_eq!(err.code(), "invalid_manifest");
        assert!(err.to_string().contains("/repo/package.json"));
    }

    #[test]
    fn broken_member_manifest_does_not_hide_the_root() {
        let host = MemoryHost::new()
            .with_file("/repo/pnpm-workspace.yaml", "packages:\n  - packages/*\n")
            .with_file("/repo/package.json", r#"{"name": "r"}"#)
            .with_file("/repo/packages/a/package.json", "{ broken");

        let root = locate(&host, Utf8Path::new("/repo/packages/a/src")).expect("locate");
        assert_eq!(root.path.as_str(), "/repo");
        assert_eq!(root.root_package_name(), "r");
    }

    #[test]
    fn broken_member_manifest_under_npm_root_is_skipped() {
        let host = MemoryHost::new()
            .with_file(
                "/repo/package.json",
                r#"{"name": "r", "workspaces": ["packages/*"]}"#,
            )
            .with_file("/repo/packages/a/package.json", "{ broken");

        let root = locate(&host, Utf8Path::new("/repo/packages/a")).expect("locate");
        assert_eq!(root.path.as_str(), "/repo");
        assert_eq!(root.marker, WorkspaceMarker::PackageJsonWorkspaces);
    }

    #[test]
    fn nearest_workspaces_field_wins() {
        let host = MemoryHost::new()
            .with_file("/repo/pnpm-workspace.yaml", "packages:\n  - packages/*\n")
            .with_file("/repo/packages/a/package.json", r#"{"name": "a", "workspaces": []}"#);

        let root = locate(&host, Utf8Path::new("/repo/packages/a")).expect("locate");
        assert_eq!(root.path.as_str(), "/repo/packages/a");
    }

    proptest! {
        #[test]
        fn locate_finds_root_from_any_depth(
            segments in prop::collection::vec("[a-z]{1,6}", 0..6),
        ) {
            let host = MemoryHost::new()
                .with_file("/ws/pnpm-workspace.yaml", "packages: []\n")
                .with_file("/ws/package.json", r#"{"name": "ws"}"#);

            let mut start = Utf8PathBuf::from("/ws");
            for s in &segments {
                start.push(s);
            }

            let root = locate(&host, &start).expect("locate");
            prop_assert_eq!(root.path.as_str(), "/ws");
            prop_assert_eq!(root.root_package_name(), "ws");
        }
    }
}
