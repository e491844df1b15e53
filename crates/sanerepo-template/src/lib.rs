//! Template rendering for convention files.
//!
//! Templates live under an injected assets directory:
//! - `files/<name>`: static templates, copied verbatim
//! - `templates/<name>`: dynamic templates, filled from live workspace data
//!
//! This crate only reads files through the `Host` it is given.

#![forbid(unsafe_code)]

mod project_dirs;

use camino::{Utf8Path, Utf8PathBuf};
use sanerepo_types::{Host, Result, SaneRepoError, WorkspaceContext};
use std::fmt;
use std::io;
use std::sync::Arc;

pub use project_dirs::{PROJECT_DIRS_PLACEHOLDER, ProjectDirsGenerator, project_names};

/// Subdirectory of the assets dir holding static templates.
pub const STATIC_DIR: &str = "files";
/// Subdirectory of the assets dir holding dynamic templates.
pub const TEMPLATE_DIR: &str = "templates";

/// What to render and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderRequest {
    /// Copy `files/<name>` verbatim.
    Static(String),
    /// Fill `templates/<name>` with the workspace's package directory names.
    ProjectDirs(String),
}

#[derive(Clone)]
pub struct TemplateGenerator {
    assets_dir: Utf8PathBuf,
    host: Arc<dyn Host>,
}

impl fmt::Debug for TemplateGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateGenerator")
            .field("assets_dir", &self.assets_dir)
            .finish_non_exhaustive()
    }
}

impl TemplateGenerator {
    pub fn new(assets_dir: impl Into<Utf8PathBuf>, host: Arc<dyn Host>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            host,
        }
    }

    pub fn assets_dir(&self) -> &Utf8Path {
        &self.assets_dir
    }

    pub fn static_path(&self, file: &str) -> Utf8PathBuf {
        self.assets_dir.join(STATIC_DIR).join(file)
    }

    pub fn template_path(&self, file: &str) -> Utf8PathBuf {
        self.assets_dir.join(TEMPLATE_DIR).join(file)
    }

    /// Content of the static template named like the file it produces.
    pub fn render_static(&self, file: &str) -> Result<String> {
        let path = self.static_path(file);
        let text = self.load(&path)?;
        tracing::debug!(template = %path, bytes = text.len(), "loaded static template");
        Ok(text)
    }

    /// Load a dynamic template and check that it carries the placeholder.
    ///
    /// Generation itself is deferred until a `WorkspaceContext` is available.
    pub fn project_dirs(&self, file: &str) -> Result<ProjectDirsGenerator> {
        let path = self.template_path(file);
        let text = self.load(&path)?;
        tracing::debug!(template = %path, "loaded project-dirs template");
        ProjectDirsGenerator::from_template(path, text)
    }

    pub async fn render(
        &self,
        request: &RenderRequest,
        ctx: &dyn WorkspaceContext,
    ) -> Result<String> {
        match request {
            RenderRequest::Static(file) => self.render_static(file),
            RenderRequest::ProjectDirs(file) => self.project_dirs(file)?.render(ctx).await,
        }
    }

    fn load(&self, path: &Utf8Path) -> Result<String> {
        self.host.read_file(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SaneRepoError::TemplateNotFound {
                path: path.to_path_buf(),
            },
            _ => SaneRepoError::io(path, e),
        })
    }
}
