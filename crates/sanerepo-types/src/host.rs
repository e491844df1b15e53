//! Capabilities the core consumes from its host.
//!
//! `Host` is plain read-only file access. `WorkspaceContext` is what a content generator
//! sees while it runs: the workspace root, root-relative reads, and the (asynchronous)
//! enumeration of registered package directories.

use crate::error::{Result, SaneRepoError};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::io;

/// Read-only file access rooted at arbitrary paths.
pub trait Host: Send + Sync {
    fn exists(&self, path: &Utf8Path) -> bool;

    fn read_file(&self, path: &Utf8Path) -> io::Result<String>;

    /// Parse a file as JSON. Malformed JSON surfaces as `ErrorKind::InvalidData`.
    fn read_json(&self, path: &Utf8Path) -> io::Result<serde_json::Value> {
        let text = self.read_file(path)?;
        serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[async_trait]
pub trait WorkspaceContext: Send + Sync {
    fn workspace_root(&self) -> &Utf8Path;

    fn host(&self) -> &dyn Host;

    /// Read a file relative to the workspace root.
    fn read_root_file(&self, rel: &str) -> Result<String> {
        let path = self.workspace_root().join(rel);
        self.host().read_file(&path).map_err(|e| SaneRepoError::io(path, e))
    }

    /// Absolute paths of every registered package directory, in the order the
    /// implementation defines.
    async fn package_dirs(&self) -> Result<Vec<Utf8PathBuf>>;
}
