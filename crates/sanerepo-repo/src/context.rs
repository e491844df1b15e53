use crate::host::{FsHost, MemoryHost};
use crate::locate::WorkspaceRoot;
use crate::members;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use sanerepo_types::ids::PACKAGE_MANIFEST;
use sanerepo_types::{Host, Result, WorkspaceContext};

/// Generation context over the real filesystem.
#[derive(Clone, Debug)]
pub struct FsWorkspaceContext {
    root: WorkspaceRoot,
    host: FsHost,
}

impl FsWorkspaceContext {
    pub fn new(root: WorkspaceRoot) -> Self {
        Self { root, host: FsHost }
    }

    pub fn root(&self) -> &WorkspaceRoot {
        &self.root
    }
}

#[async_trait]
impl WorkspaceContext for FsWorkspaceContext {
    fn workspace_root(&self) -> &Utf8Path {
        &self.root.path
    }

    fn host(&self) -> &dyn Host {
        &self.host
    }

    async fn package_dirs(&self) -> Result<Vec<Utf8PathBuf>> {
        members::discover_members(self, self.root.marker)
    }
}

/// Generation context over a `MemoryHost`; members are the directories of its `package.json`
/// files, filtered by the workspace's member patterns.
#[derive(Clone, Debug)]
pub struct MemoryWorkspaceContext {
    root: WorkspaceRoot,
    host: MemoryHost,
}

impl MemoryWorkspaceContext {
    pub fn new(root: WorkspaceRoot, host: MemoryHost) -> Self {
        Self { root, host }
    }

    pub fn root(&self) -> &WorkspaceRoot {
        &self.root
    }
}

#[async_trait]
impl WorkspaceContext for MemoryWorkspaceContext {
    fn workspace_root(&self) -> &Utf8Path {
        &self.root.path
    }

    fn host(&self) -> &dyn Host {
        &self.host
    }

    async fn package_dirs(&self) -> Result<Vec<Utf8PathBuf>> {
        let (selector, _) = members::member_selector(self, self.root.marker)?;

        let candidates = self
            .host
            .files()
            .filter(|f| f.file_name() == Some(PACKAGE_MANIFEST))
            .filter_map(Utf8Path::parent)
            .map(Utf8Path::to_path_buf);
        Ok(members::select_members(&self.root.path, &selector, candidates))
    }
}
