use crate::locate::WorkspaceMarker;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use sanerepo_types::ids::PACKAGE_MANIFEST;
use sanerepo_types::{Result, SaneRepoError, WorkspaceContext};
use serde::Deserialize;
use serde_json::Value;
use walkdir::WalkDir;

#[derive(Debug, Default, Deserialize)]
struct PnpmWorkspaceFile {
    #[serde(default)]
    packages: Vec<String>,
}

/// Member patterns declared by the workspace manifest, plus the file they came from.
///
/// The manifest is read through the context, relative to the workspace root.
pub fn member_patterns(
    ctx: &dyn WorkspaceContext,
    marker: WorkspaceMarker,
) -> Result<(Utf8PathBuf, Vec<String>)> {
    let source = ctx.workspace_root().join(marker.file_name());
    let text = ctx.read_root_file(marker.file_name())?;
    let patterns = match marker {
        WorkspaceMarker::PnpmWorkspace => {
            parse_pnpm_workspace(&text).map_err(|e| invalid(&source, e))?
        }
        WorkspaceMarker::PackageJsonWorkspaces => {
            let manifest: Value = serde_json::from_str(&text).map_err(|e| invalid(&source, e))?;
            npm_workspaces(&manifest).map_err(|reason| invalid(&source, reason))?
        }
    };
    Ok((source, patterns))
}

/// Compile the declared member patterns into a selector.
pub(crate) fn member_selector(
    ctx: &dyn WorkspaceContext,
    marker: WorkspaceMarker,
) -> Result<(MemberSelector, usize)> {
    let (source, patterns) = member_patterns(ctx, marker)?;
    let selector = MemberSelector::new(&patterns).map_err(|e| invalid(&source, e))?;
    Ok((selector, patterns.len()))
}

pub(crate) fn parse_pnpm_workspace(
    text: &str,
) -> std::result::Result<Vec<String>, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    // `~` / `null` documents count as empty too.
    let parsed: Option<PnpmWorkspaceFile> = serde_yaml::from_str(text)?;
    Ok(parsed.unwrap_or_default().packages)
}

fn npm_workspaces(manifest: &Value) -> std::result::Result<Vec<String>, String> {
    let list = match manifest.get("workspaces") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(Value::Object(obj)) => match obj.get("packages") {
            Some(Value::Array(items)) => items,
            None => return Ok(Vec::new()),
            Some(_) => {
                return Err("workspaces.packages: expected an array of strings".to_string());
            }
        },
        Some(_) => {
            return Err("workspaces: expected an array or an object with `packages`".to_string());
        }
    };
    list.iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| "workspaces: expected an array of strings".to_string())
        })
        .collect()
}

fn invalid(path: &Utf8Path, err: impl std::fmt::Display) -> SaneRepoError {
    SaneRepoError::InvalidManifest {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Compiled member patterns. A leading `!` turns a pattern into an exclusion.
#[derive(Clone, Debug)]
pub struct MemberSelector {
    include: GlobSet,
    exclude: GlobSet,
}

impl MemberSelector {
    pub fn new(patterns: &[String]) -> std::result::Result<Self, globset::Error> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();
        for raw in patterns {
            let (negated, pattern) = match raw.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, raw.as_str()),
            };
            let pattern = normalize_pattern(pattern);
            if pattern.is_empty() {
                continue;
            }
            // `*` stays within one path segment, as in pnpm and npm.
            let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
            if negated {
                exclude.add(glob);
            } else {
                include.add(glob);
            }
        }
        Ok(Self {
            include: include.build()?,
            exclude: exclude.build()?,
        })
    }

    /// `rel_dir` is a root-relative directory with forward slashes.
    pub fn is_member(&self, rel_dir: &str) -> bool {
        self.include.is_match(rel_dir) && !self.exclude.is_match(rel_dir)
    }
}

fn normalize_pattern(pattern: &str) -> &str {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    pattern.trim_end_matches('/')
}

/// Keep the candidate package directories the selector accepts, as sorted absolute paths.
///
/// Candidates are absolute directories that hold a `package.json`. The root itself and
/// anything under `node_modules` are never members.
pub fn select_members<I>(
    root: &Utf8Path,
    selector: &MemberSelector,
    candidates: I,
) -> Vec<Utf8PathBuf>
where
    I: IntoIterator<Item = Utf8PathBuf>,
{
    let mut out: Vec<Utf8PathBuf> = candidates
        .into_iter()
        .filter(|dir| {
            let Ok(rel) = dir.strip_prefix(root) else {
                return false;
            };
            let rel = rel.as_str().replace('\\', "/");
            !rel.is_empty()
                && !rel.split('/').any(|c| c == "node_modules")
                && selector.is_member(&rel)
        })
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Package directories of a workspace on disk, in lexicographic path order.
///
/// A directory that cannot be read aborts the walk with `Io` rather than silently dropping
/// the members below it.
pub fn discover_members(
    ctx: &dyn WorkspaceContext,
    marker: WorkspaceMarker,
) -> Result<Vec<Utf8PathBuf>> {
    let root = ctx.workspace_root();
    let (selector, pattern_count) = member_selector(ctx, marker)?;

    let mut candidates = Vec::new();
    let walk = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules" && e.file_name() != ".git");
    for entry in walk {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let Ok(dir) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
            continue;
        };
        if ctx.host().exists(&dir.join(PACKAGE_MANIFEST)) {
            candidates.push(dir);
        }
    }

    let members = select_members(root, &selector, candidates);
    tracing::debug!(
        root = %root,
        patterns = pattern_count,
        members = members.len(),
        "enumerated workspace members"
    );
    Ok(members)
}

fn walk_error(root: &Utf8Path, err: walkdir::Error) -> SaneRepoError {
    let path = err
        .path()
        .and_then(|p| Utf8Path::from_path(p))
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    SaneRepoError::io(path, err.into())
}
