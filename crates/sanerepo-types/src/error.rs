//! Error taxonomy for the core.
//!
//! Every variant is fatal: the failures stem from missing or malformed local files, so
//! nothing here is retried and no partial rule list is ever produced.

use camino::Utf8PathBuf;

pub type Result<T, E = SaneRepoError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SaneRepoError {
    /// No ancestor of the start directory (including the filesystem root) holds a
    /// workspace marker.
    #[error(
        "failed to find a workspace root at or above {start} (looked for pnpm-workspace.yaml or a package.json with `workspaces`)"
    )]
    WorkspaceNotFound { start: Utf8PathBuf },

    /// The settings file exists but is not a JSON object with string-array partitions.
    #[error("invalid settings in {path}: {reason}")]
    InvalidSettings { path: Utf8PathBuf, reason: String },

    #[error("template not found: {path}")]
    TemplateNotFound { path: Utf8PathBuf },

    /// A dynamic template does not contain its placeholder token.
    #[error("template {path} does not contain the `{token}` placeholder")]
    PlaceholderMissing {
        path: Utf8PathBuf,
        token: &'static str,
    },

    /// A workspace manifest (`package.json`, `pnpm-workspace.yaml`) could not be interpreted.
    #[error("invalid workspace manifest {path}: {reason}")]
    InvalidManifest { path: Utf8PathBuf, reason: String },

    /// A rule builder was given options the engine cannot act on.
    #[error("invalid {kind} rule: {reason}")]
    InvalidRule { kind: &'static str, reason: String },

    #[error("failed to read {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SaneRepoError {
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        SaneRepoError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short stable code, used in CLI output and tests.
    pub fn code(&self) -> &'static str {
        match self {
            SaneRepoError::WorkspaceNotFound { .. } => "workspace_not_found",
            SaneRepoError::InvalidSettings { .. } => "invalid_settings",
            SaneRepoError::TemplateNotFound { .. } => "template_not_found",
            SaneRepoError::PlaceholderMissing { .. } => "placeholder_missing",
            SaneRepoError::InvalidManifest { .. } => "invalid_manifest",
            SaneRepoError::InvalidRule { .. } => "invalid_rule",
            SaneRepoError::Io { .. } => "io",
        }
    }
}
