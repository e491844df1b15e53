use camino::{Utf8Path, Utf8PathBuf};
use sanerepo_types::Host;
use std::collections::BTreeMap;
use std::io;

/// `Host` backed by the real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsHost;

impl Host for FsHost {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.exists()
    }

    fn read_file(&self, path: &Utf8Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// `Host` over an in-memory file map. Directories exist implicitly when a file lies below them.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    files: BTreeMap<Utf8PathBuf, String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Every file path, in sorted order.
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.files.keys().map(Utf8PathBuf::as_path)
    }
}

impl Host for MemoryHost {
    fn exists(&self, path: &Utf8Path) -> bool {
        self.files.contains_key(path) || self.files.keys().any(|f| f.starts_with(path))
    }

    fn read_file(&self, path: &Utf8Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
        })
    }
}
