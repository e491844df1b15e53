use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use sanerepo_types::ids::GENERATOR_PROJECT_DIRS;
use sanerepo_types::{
    ContentGenerator, GeneratorDescriptor, Result, SaneRepoError, WorkspaceContext,
};

pub const PROJECT_DIRS_PLACEHOLDER: &str = "INSERT_PROJECT_DIRS";

// A quoted placeholder keeps the template itself valid JavaScript; the quotes go with it.
const QUOTED_PLACEHOLDER: &str = "\"INSERT_PROJECT_DIRS\"";

/// Fills a template's placeholder with the workspace's package directory names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectDirsGenerator {
    path: Utf8PathBuf,
    text: String,
    needle: &'static str,
}

impl ProjectDirsGenerator {
    /// Fails with `PlaceholderMissing` when the token is absent.
    pub fn from_template(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let text = text.into();
        let needle = if text.contains(QUOTED_PLACEHOLDER) {
            QUOTED_PLACEHOLDER
        } else if text.contains(PROJECT_DIRS_PLACEHOLDER) {
            PROJECT_DIRS_PLACEHOLDER
        } else {
            return Err(SaneRepoError::PlaceholderMissing {
                path,
                token: PROJECT_DIRS_PLACEHOLDER,
            });
        };
        Ok(Self { path, text, needle })
    }

    pub fn template_path(&self) -> &Utf8Path {
        &self.path
    }

    /// Replace the placeholder with `"a", "b", ...` in the given order.
    pub fn splice<I, S>(&self, names: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = names
            .into_iter()
            .map(|n| format!("\"{}\"", n.as_ref()))
            .collect::<Vec<_>>()
            .join(", ");
        self.text.replacen(self.needle, &list, 1)
    }

    pub async fn render(&self, ctx: &dyn WorkspaceContext) -> Result<String> {
        let dirs = ctx.package_dirs().await?;
        tracing::debug!(
            template = %self.path,
            packages = dirs.len(),
            "splicing package directories into template"
        );
        Ok(self.splice(project_names(&dirs)))
    }
}

/// Base names of package directories, order preserved.
pub fn project_names(dirs: &[Utf8PathBuf]) -> Vec<String> {
    dirs.iter()
        .map(|d| d.file_name().unwrap_or(d.as_str()).to_string())
        .collect()
}

#[async_trait]
impl ContentGenerator for ProjectDirsGenerator {
    fn descriptor(&self) -> GeneratorDescriptor {
        GeneratorDescriptor {
            generator: GENERATOR_PROJECT_DIRS.to_string(),
            template: self.path.clone(),
        }
    }

    async fn generate(&self, ctx: &dyn WorkspaceContext) -> Result<String> {
        self.render(ctx).await
    }
}
