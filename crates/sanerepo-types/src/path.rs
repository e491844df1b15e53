use serde::{Deserialize, Serialize};

/// Canonical package-relative path used for files a rule manages.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - never absolute (absolute inputs are preserved but rejected by rule builders)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoPath(String);

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        // Avoid empty path; keep it explicit.
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for a relative path that stays inside the package directory.
    pub fn is_clean(&self) -> bool {
        let p = self.as_str();
        !(p == "."
            || p.starts_with('/')
            || p.split('/').any(|seg| seg == "..")
            // Windows-style drive letters like C:
            || (p.len() >= 2 && p.as_bytes()[1] == b':'))
    }
}

impl From<&str> for RepoPath {
    fn from(value: &str) -> Self {
        RepoPath::new(value)
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
