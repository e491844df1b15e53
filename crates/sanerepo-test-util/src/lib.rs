//! Shared test utilities for the sanerepo workspace.
//!
//! This crate exists because `xtask` walks the shared fixtures at runtime (not behind
//! `#[cfg(test)]`), and several crates build throwaway workspaces the same way.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

/// Root of the repository checkout.
pub fn repo_root() -> Utf8PathBuf {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/sanerepo-test-util -> crates -> repo root
    manifest_dir
        .parent()
        .and_then(Utf8Path::parent)
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

/// `tests/fixtures` at the repository root.
pub fn fixtures_dir() -> Utf8PathBuf {
    repo_root().join("tests").join("fixtures")
}

/// The bundled `assets/` directory.
pub fn assets_dir() -> Utf8PathBuf {
    repo_root().join("assets")
}

/// Names of every fixture workspace, sorted.
pub fn fixture_names() -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(fixtures_dir())? {
        let entry = entry?;
        if entry.file_type()?.is_dir()
            && let Some(name) = entry.file_name().to_str()
        {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// A throwaway pnpm workspace on disk.
///
/// The directory is removed when the value is dropped.
pub struct FixtureWorkspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl FixtureWorkspace {
    /// A workspace with `pnpm-workspace.yaml` listing `patterns` and a root `package.json`.
    pub fn pnpm(root_name: &str, patterns: &[&str]) -> std::io::Result<Self> {
        let tmp = TempDir::new()?;
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).map_err(|p| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("non UTF-8 temp dir: {}", p.display()),
            )
        })?;
        let ws = Self { _tmp: tmp, root };

        let mut yaml = String::from("packages:\n");
        for p in patterns {
            yaml.push_str(&format!("  - '{p}'\n"));
        }
        ws.file("pnpm-workspace.yaml", &yaml)?;
        ws.json("package.json", &serde_json::json!({ "name": root_name }))?;
        Ok(ws)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn file(&self, rel: &str, text: &str) -> std::io::Result<&Self> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, text)?;
        Ok(self)
    }

    pub fn json(&self, rel: &str, value: &Value) -> std::io::Result<&Self> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.file(rel, &text)
    }

    /// Add a package directory with a minimal `package.json`.
    pub fn package(&self, rel_dir: &str, name: &str) -> std::io::Result<&Self> {
        self.json(
            &format!("{rel_dir}/package.json"),
            &serde_json::json!({ "name": name, "version": "0.0.0" }),
        )
    }

    /// Write `.sanerepo.json`.
    pub fn settings(&self, value: &Value) -> std::io::Result<&Self> {
        self.json(".sanerepo.json", value)
    }
}

/// Replace every occurrence of each `(from, to)` pair inside JSON strings, at any depth.
///
/// Used to strip machine-specific absolute paths from output before comparing.
pub fn normalize_paths(mut value: Value, replacements: &[(&str, &str)]) -> Value {
    normalize_strings_recursive(&mut value, replacements);
    value
}

fn normalize_strings_recursive(value: &mut Value, replacements: &[(&str, &str)]) {
    match value {
        Value::String(s) => {
            for (from, to) in replacements {
                if !from.is_empty() && s.contains(from) {
                    *s = s.replace(from, to);
                }
            }
        }
        Value::Object(map) => {
            for val in map.values_mut() {
                normalize_strings_recursive(val, replacements);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_strings_recursive(val, replacements);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_replaces_nested_strings_only() {
        let input = json!({
            "template": "/home/me/sanerepo/assets/templates/jest.config.cjs",
            "list": ["/home/me/sanerepo/assets/files/.gitignore", 3],
            "/home/me/sanerepo": "keys stay"
        });
        let out = normalize_paths(input, &[("/home/me/sanerepo/assets", "<ASSETS>")]);
        assert_eq!(out["template"], "<ASSETS>/templates/jest.config.cjs");
        assert_eq!(out["list"][0], "<ASSETS>/files/.gitignore");
        assert_eq!(out["list"][1], 3);
        assert!(out.get("/home/me/sanerepo").is_some());
    }

    #[test]
    fn empty_pattern_is_ignored() {
        let out = normalize_paths(json!("abc"), &[("", "x")]);
        assert_eq!(out, "abc");
    }

    #[test]
    fn fixture_workspace_writes_manifests() {
        let ws = FixtureWorkspace::pnpm("root", &["packages/*"]).expect("workspace");
        ws.package("packages/a", "a").expect("package");
        ws.settings(&json!({ "esmOnly": ["a"] })).expect("settings");

        let yaml =
            std::fs::read_to_string(ws.root().join("pnpm-workspace.yaml")).expect("read yaml");
        assert!(yaml.contains("- 'packages/*'"));
        assert!(ws.root().join("packages/a/package.json").exists());
        assert!(ws.root().join(".sanerepo.json").exists());
    }

    #[test]
    fn repo_root_holds_the_workspace_manifest() {
        assert!(repo_root().join("Cargo.toml").exists());
    }
}
