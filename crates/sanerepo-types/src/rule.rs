//! Rule descriptors: the unit of policy handed to the enforcement engine.
//!
//! Descriptors are immutable value objects. The engine reads `kind`, `scope`, and `options`
//! to decide how to check (and fix) each package; nothing in this crate evaluates them
//! against a package besides [`PackageFilter::matches`].

use crate::error::Result;
use crate::host::WorkspaceContext;
use crate::ids;
use crate::path::RepoPath;
use async_trait::async_trait;
use camino::Utf8PathBuf;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    FileContents,
    PackageEntry,
    PackageScript,
    PackageOrder,
    AlphabeticalDependencies,
    AlphabeticalScripts,
    RequireDependency,
    StandardTsconfig,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::FileContents => ids::RULE_FILE_CONTENTS,
            RuleKind::PackageEntry => ids::RULE_PACKAGE_ENTRY,
            RuleKind::PackageScript => ids::RULE_PACKAGE_SCRIPT,
            RuleKind::PackageOrder => ids::RULE_PACKAGE_ORDER,
            RuleKind::AlphabeticalDependencies => ids::RULE_ALPHABETICAL_DEPENDENCIES,
            RuleKind::AlphabeticalScripts => ids::RULE_ALPHABETICAL_SCRIPTS,
            RuleKind::RequireDependency => ids::RULE_REQUIRE_DEPENDENCY,
            RuleKind::StandardTsconfig => ids::RULE_STANDARD_TSCONFIG,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which packages a rule applies to.
///
/// `include_packages: None` means every package. The workspace root package is only
/// considered when `include_workspace_root` is set, and then also goes through the
/// include/exclude lists like any other package.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageFilter {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_workspace_root: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_packages: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_packages: Vec<String>,
}

impl PackageFilter {
    /// Every package, workspace root excluded.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_packages: Some(packages.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn excluding<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude_packages: packages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_workspace_root(mut self, include: bool) -> Self {
        self.include_workspace_root = include;
        self
    }

    /// "All packages, no exclusions" (the root flag is not considered).
    pub fn is_all_packages(&self) -> bool {
        self.include_packages.is_none() && self.exclude_packages.is_empty()
    }

    pub fn matches(&self, package_name: &str, is_workspace_root: bool) -> bool {
        if is_workspace_root && !self.include_workspace_root {
            return false;
        }
        if let Some(include) = &self.include_packages
            && !include.iter().any(|p| p == package_name)
        {
            return false;
        }
        !self.exclude_packages.iter().any(|p| p == package_name)
    }
}

/// Expected state of one script entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptExpectation {
    /// The script must exist with exactly this command.
    Exact(String),
    /// The script must not exist.
    Absent,
}

impl From<&str> for ScriptExpectation {
    fn from(value: &str) -> Self {
        ScriptExpectation::Exact(value.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRequirements {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl DependencyRequirements {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }
}

/// Serializable identity of a content generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorDescriptor {
    pub generator: String,
    pub template: Utf8PathBuf,
}

/// Computes file content from live workspace data.
#[async_trait]
pub trait ContentGenerator: Send + Sync + fmt::Debug {
    fn descriptor(&self) -> GeneratorDescriptor;

    async fn generate(&self, ctx: &dyn WorkspaceContext) -> Result<String>;
}

/// Content a file-contents rule expects.
#[derive(Clone, Debug)]
pub enum FileContent {
    Static(String),
    Generated(Arc<dyn ContentGenerator>),
}

impl FileContent {
    pub fn is_generated(&self) -> bool {
        matches!(self, FileContent::Generated(_))
    }

    pub fn as_static(&self) -> Option<&str> {
        match self {
            FileContent::Static(text) => Some(text),
            FileContent::Generated(_) => None,
        }
    }

    pub async fn resolve(&self, ctx: &dyn WorkspaceContext) -> Result<String> {
        match self {
            FileContent::Static(text) => Ok(text.clone()),
            FileContent::Generated(generator) => generator.generate(ctx).await,
        }
    }
}

impl PartialEq for FileContent {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FileContent::Static(a), FileContent::Static(b)) => a == b,
            (FileContent::Generated(a), FileContent::Generated(b)) => {
                a.descriptor() == b.descriptor()
            }
            _ => false,
        }
    }
}

impl Serialize for FileContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            FileContent::Static(text) => map.serialize_entry("static", text)?,
            FileContent::Generated(generator) => {
                map.serialize_entry("generated", &generator.descriptor())?
            }
        }
        map.end()
    }
}

/// Kind-specific rule options; the variant determines the rule kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "kebab-case")]
pub enum RuleOptions {
    FileContents { file: RepoPath, content: FileContent },
    PackageEntry { entries: BTreeMap<String, Value> },
    PackageScript { scripts: BTreeMap<String, ScriptExpectation> },
    PackageOrder,
    AlphabeticalDependencies,
    AlphabeticalScripts,
    RequireDependency(DependencyRequirements),
    StandardTsconfig { template: Value },
}

impl RuleOptions {
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleOptions::FileContents { .. } => RuleKind::FileContents,
            RuleOptions::PackageEntry { .. } => RuleKind::PackageEntry,
            RuleOptions::PackageScript { .. } => RuleKind::PackageScript,
            RuleOptions::PackageOrder => RuleKind::PackageOrder,
            RuleOptions::AlphabeticalDependencies => RuleKind::AlphabeticalDependencies,
            RuleOptions::AlphabeticalScripts => RuleKind::AlphabeticalScripts,
            RuleOptions::RequireDependency(_) => RuleKind::RequireDependency,
            RuleOptions::StandardTsconfig { .. } => RuleKind::StandardTsconfig,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuleDescriptor {
    #[serde(flatten)]
    pub options: RuleOptions,
    pub scope: PackageFilter,
}

impl RuleDescriptor {
    pub fn new(scope: PackageFilter, options: RuleOptions) -> Self {
        Self { options, scope }
    }

    pub fn kind(&self) -> RuleKind {
        self.options.kind()
    }

    /// The managed file, for file-contents rules.
    pub fn file(&self) -> Option<&RepoPath> {
        match &self.options {
            RuleOptions::FileContents { file, .. } => Some(file),
            _ => None,
        }
    }
}

/// Ordered rule list. Order only affects how the engine reports; rules are independent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleList(Vec<RuleDescriptor>);

impl RuleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: RuleDescriptor) {
        self.0.push(rule);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleDescriptor> {
        self.0.iter()
    }

    pub fn of_kind(&self, kind: RuleKind) -> impl Iterator<Item = &RuleDescriptor> {
        self.0.iter().filter(move |r| r.kind() == kind)
    }

    pub fn file_rule(&self, file: &str) -> Option<&RuleDescriptor> {
        self.0
            .iter()
            .find(|r| r.file().is_some_and(|f| f.as_str() == file))
    }
}

impl FromIterator<RuleDescriptor> for RuleList {
    fn from_iter<I: IntoIterator<Item = RuleDescriptor>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuleList {
    type Item = &'a RuleDescriptor;
    type IntoIter = std::slice::Iter<'a, RuleDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for RuleList {
    type Item = RuleDescriptor;
    type IntoIter = std::vec::IntoIter<RuleDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Host;
    use camino::Utf8Path;
    use serde_json::json;

    #[derive(Debug)]
    struct Fixed(&'static str);

    #[async_trait]
    impl ContentGenerator for Fixed {
        fn descriptor(&self) -> GeneratorDescriptor {
            GeneratorDescriptor {
                generator: "fixed".to_string(),
                template: Utf8PathBuf::from(self.0),
            }
        }

        async fn generate(&self, _ctx: &dyn WorkspaceContext) -> Result<String> {
            Ok(format!("generated from {}", self.0))
        }
    }

    struct NoFiles;

    impl Host for NoFiles {
        fn exists(&self, _path: &Utf8Path) -> bool {
            false
        }

        fn read_file(&self, _path: &Utf8Path) -> std::io::Result<String> {
            Err(std::io::ErrorKind::NotFound.into())
        }
    }

    struct EmptyWorkspace;

    #[async_trait]
    impl WorkspaceContext for EmptyWorkspace {
        fn workspace_root(&self) -> &Utf8Path {
            Utf8Path::new("/repo")
        }

        fn host(&self) -> &dyn Host {
            &NoFiles
        }

        async fn package_dirs(&self) -> Result<Vec<Utf8PathBuf>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn filter_root_requires_flag() {
        let filter = PackageFilter::only(["root"]);
        assert!(!filter.matches("root", true));
        assert!(filter.with_workspace_root(true).matches("root", true));
    }

    #[test]
    fn filter_include_and_exclude() {
        let all = PackageFilter::all();
        assert!(all.is_all_packages());
        assert!(all.matches("anything", false));
        assert!(!all.matches("root", true));

        let only = PackageFilter::only(["a", "b"]);
        assert!(only.matches("a", false));
        assert!(!only.matches("c", false));
        assert!(!only.is_all_packages());

        let excluding = PackageFilter::excluding(["a"]);
        assert!(!excluding.matches("a", false));
        assert!(excluding.matches("b", false));
        assert!(!excluding.is_all_packages());

        // An empty exclusion list is still "all packages".
        assert!(PackageFilter::excluding(Vec::<String>::new()).is_all_packages());
    }

    #[test]
    fn descriptor_serializes_kind_options_scope() {
        let mut scripts = BTreeMap::new();
        scripts.insert("clean".to_string(), ScriptExpectation::from("rm -rf lib"));
        scripts.insert("check:jest".to_string(), ScriptExpectation::Absent);
        let rule = RuleDescriptor::new(
            PackageFilter::excluding(["esm"]),
            RuleOptions::PackageScript { scripts },
        );

        let value = serde_json::to_value(&rule).expect("serialize");
        assert_eq!(
            value,
            json!({
                "kind": "package-script",
                "options": { "scripts": { "check:jest": null, "clean": "rm -rf lib" } },
                "scope": { "excludePackages": ["esm"] }
            })
        );
    }

    #[test]
    fn unit_kinds_serialize_without_options() {
        let rule = RuleDescriptor::new(
            PackageFilter::all().with_workspace_root(true),
            RuleOptions::PackageOrder,
        );
        let value = serde_json::to_value(&rule).expect("serialize");
        assert_eq!(
            value,
            json!({ "kind": "package-order", "scope": { "includeWorkspaceRoot": true } })
        );
        assert_eq!(rule.kind().as_str(), ids::RULE_PACKAGE_ORDER);
    }

    #[test]
    fn script_expectation_round_trips_null_as_absent() {
        let parsed: BTreeMap<String, ScriptExpectation> =
            serde_json::from_value(json!({ "a": "cmd", "b": null })).expect("parse");
        assert_eq!(parsed["a"], ScriptExpectation::Exact("cmd".to_string()));
        assert_eq!(parsed["b"], ScriptExpectation::Absent);
    }

    #[test]
    fn generated_content_compares_by_descriptor() {
        let a = FileContent::Generated(Arc::new(Fixed("/t/jest.config.cjs")));
        let b = FileContent::Generated(Arc::new(Fixed("/t/jest.config.cjs")));
        let c = FileContent::Generated(Arc::new(Fixed("/other")));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, FileContent::Static("x".to_string()));

        let value = serde_json::to_value(&a).expect("serialize");
        assert_eq!(
            value,
            json!({ "generated": { "generator": "fixed", "template": "/t/jest.config.cjs" } })
        );
    }

    #[test]
    fn resolve_runs_generator() {
        let content = FileContent::Generated(Arc::new(Fixed("/t/x")));
        let text = futures::executor::block_on(content.resolve(&EmptyWorkspace)).expect("resolve");
        assert_eq!(text, "generated from /t/x");

        let text = futures::executor::block_on(
            FileContent::Static("literal".to_string()).resolve(&EmptyWorkspace),
        )
        .expect("resolve");
        assert_eq!(text, "literal");
    }

    #[test]
    fn rule_list_lookup_helpers() {
        let list: RuleList = vec![
            RuleDescriptor::new(
                PackageFilter::only(["root"]).with_workspace_root(true),
                RuleOptions::FileContents {
                    file: RepoPath::new(".gitignore"),
                    content: FileContent::Static("node_modules\n".to_string()),
                },
            ),
            RuleDescriptor::new(PackageFilter::all(), RuleOptions::AlphabeticalScripts),
        ]
        .into_iter()
        .collect();

        assert_eq!(list.len(), 2);
        assert_eq!(list.of_kind(RuleKind::FileContents).count(), 1);
        assert!(list.file_rule(".gitignore").is_some());
        assert!(list.file_rule("turbo.json").is_none());
    }

    #[test]
    fn kind_ids_match_serde_names() {
        let kinds = [
            RuleKind::FileContents,
            RuleKind::PackageEntry,
            RuleKind::PackageScript,
            RuleKind::PackageOrder,
            RuleKind::AlphabeticalDependencies,
            RuleKind::AlphabeticalScripts,
            RuleKind::RequireDependency,
            RuleKind::StandardTsconfig,
        ];
        for kind in kinds {
            assert_eq!(serde_json::to_value(kind).expect("serialize"), json!(kind.as_str()));
        }
    }
}
