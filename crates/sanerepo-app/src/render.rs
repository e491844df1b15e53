//! Render use cases: rule lists as JSON or text, convention files as their expected content.

use anyhow::{Context, bail};
use sanerepo_rules::presets;
use sanerepo_template::{RenderRequest, TemplateGenerator};
use sanerepo_types::{
    FileContent, PackageFilter, RuleDescriptor, RuleList, RuleOptions, ScriptExpectation,
    WorkspaceContext,
};
use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

pub fn render_rules(rules: &RuleList, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => rules_json(rules),
        OutputFormat::Text => Ok(rules_text(rules)),
    }
}

/// Pretty JSON with a trailing newline, as handed to the enforcement engine.
pub fn rules_json(rules: &RuleList) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(rules).context("serialize rule list")?;
    json.push('\n');
    Ok(json)
}

/// One line per rule: position, kind, scope, and a short summary of the options.
pub fn rules_text(rules: &RuleList) -> String {
    let mut out = String::new();
    for (idx, rule) in rules.iter().enumerate() {
        let _ = write!(out, "{}. {} [{}]", idx + 1, rule.kind(), describe_scope(&rule.scope));
        let detail = describe_options(rule);
        if !detail.is_empty() {
            out.push(' ');
            out.push_str(&detail);
        }
        out.push('\n');
    }
    out
}

fn describe_scope(scope: &PackageFilter) -> String {
    let mut parts = Vec::new();
    if scope.include_workspace_root {
        parts.push("root".to_string());
    }
    let mut packages = match &scope.include_packages {
        None => "all packages".to_string(),
        Some(names) => format!("only {}", names.join(", ")),
    };
    if !scope.exclude_packages.is_empty() {
        let _ = write!(packages, " except {}", scope.exclude_packages.join(", "));
    }
    parts.push(packages);
    parts.join(" + ")
}

fn describe_options(rule: &RuleDescriptor) -> String {
    match &rule.options {
        RuleOptions::FileContents { file, content } => match content {
            FileContent::Static(_) => format!("{file} (static)"),
            FileContent::Generated(generator) => {
                format!("{file} (generated: {})", generator.descriptor().generator)
            }
        },
        RuleOptions::PackageEntry { entries } => entries
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        RuleOptions::PackageScript { scripts } => scripts
            .iter()
            .map(|(name, expected)| match expected {
                ScriptExpectation::Exact(_) => name.clone(),
                ScriptExpectation::Absent => format!("!{name}"),
            })
            .collect::<Vec<_>>()
            .join(", "),
        RuleOptions::RequireDependency(reqs) => {
            let mut parts = Vec::new();
            if !reqs.dependencies.is_empty() {
                let names: Vec<&str> = reqs.dependencies.keys().map(String::as_str).collect();
                parts.push(format!("dependencies: {}", names.join(", ")));
            }
            if !reqs.dev_dependencies.is_empty() {
                let names: Vec<&str> = reqs.dev_dependencies.keys().map(String::as_str).collect();
                parts.push(format!("devDependencies: {}", names.join(", ")));
            }
            parts.join("; ")
        }
        RuleOptions::StandardTsconfig { .. } => "tsconfig.json".to_string(),
        RuleOptions::PackageOrder
        | RuleOptions::AlphabeticalDependencies
        | RuleOptions::AlphabeticalScripts => String::new(),
    }
}

/// Expected content of one managed root file.
pub fn render_convention_file(
    templates: &TemplateGenerator,
    file: &str,
    ctx: &dyn WorkspaceContext,
) -> anyhow::Result<String> {
    let request = if file == presets::JEST_CONFIG {
        RenderRequest::ProjectDirs(file.to_string())
    } else if presets::ROOT_FILES.contains(&file) {
        RenderRequest::Static(file.to_string())
    } else {
        let mut known: Vec<&str> = presets::ROOT_FILES.to_vec();
        known.push(presets::JEST_CONFIG);
        bail!(
            "`{file}` is not a managed convention file (known: {})",
            known.join(", ")
        );
    };

    let text = futures::executor::block_on(templates.render(&request, ctx))
        .with_context(|| format!("render {file}"))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use sanerepo_repo::{FsHost, FsWorkspaceContext, locate};
    use sanerepo_test_util::{FixtureWorkspace, assets_dir};
    use sanerepo_types::{DependencyRequirements, GeneratorDescriptor, RepoPath};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn sample_rules() -> RuleList {
        let root = PackageFilter::only(["demo"]).with_workspace_root(true);
        let mut scripts = BTreeMap::new();
        scripts.insert(
            "transpile-typescript".to_string(),
            ScriptExpectation::from("tsup --format esm"),
        );
        scripts.insert("check:jest".to_string(), ScriptExpectation::Absent);
        let mut dev = BTreeMap::new();
        dev.insert("typescript".to_string(), "^5.1.3".to_string());
        dev.insert("tslib".to_string(), "^2.5.3".to_string());

        [
            RuleDescriptor::new(
                root.clone(),
                RuleOptions::FileContents {
                    file: RepoPath::new(".gitignore"),
                    content: FileContent::Static("node_modules\n".to_string()),
                },
            ),
            RuleDescriptor::new(
                PackageFilter::excluding(["a", "b"]),
                RuleOptions::PackageScript { scripts },
            ),
            RuleDescriptor::new(
                PackageFilter::all(),
                RuleOptions::RequireDependency(DependencyRequirements {
                    dependencies: BTreeMap::new(),
                    dev_dependencies: dev,
                }),
            ),
            RuleDescriptor::new(
                PackageFilter::all().with_workspace_root(true),
                RuleOptions::PackageOrder,
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn text_rendering() {
        assert_snapshot!(rules_text(&sample_rules()), @r"
        1. file-contents [root + only demo] .gitignore (static)
        2. package-script [all packages except a, b] !check:jest, transpile-typescript
        3. require-dependency [all packages] devDependencies: tslib, typescript
        4. package-order [root + all packages]
        ");
    }

    #[test]
    fn json_rendering_uses_kind_scope_options() {
        let json = rules_json(&sample_rules()).expect("json");
        assert!(json.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        let first = &value[0];
        assert_eq!(first["kind"], "file-contents");
        assert_eq!(first["scope"]["includeWorkspaceRoot"], true);
        assert_eq!(first["options"]["file"], ".gitignore");
        assert_eq!(first["options"]["content"]["static"], "node_modules\n");

        assert_eq!(value[1]["scope"]["excludePackages"][1], "b");
        let scripts = value[1]["options"]["scripts"].as_object().expect("scripts object");
        assert!(scripts["check:jest"].is_null(), "absent scripts serialize as null");
        assert_eq!(value[2]["options"]["devDependencies"]["tslib"], "^2.5.3");
        assert_eq!(value[3]["kind"], "package-order");
    }

    #[test]
    fn generated_content_serializes_descriptor() {
        #[derive(Debug)]
        struct Fake;

        #[async_trait::async_trait]
        impl sanerepo_types::ContentGenerator for Fake {
            fn descriptor(&self) -> GeneratorDescriptor {
                GeneratorDescriptor {
                    generator: "project-dirs".to_string(),
                    template: "/assets/templates/jest.config.cjs".into(),
                }
            }

            async fn generate(
                &self,
                _ctx: &dyn WorkspaceContext,
            ) -> sanerepo_types::Result<String> {
                Ok(String::new())
            }
        }

        let rules: RuleList = [RuleDescriptor::new(
            PackageFilter::all(),
            RuleOptions::FileContents {
                file: RepoPath::new("jest.config.cjs"),
                content: FileContent::Generated(Arc::new(Fake)),
            },
        )]
        .into_iter()
        .collect();

        assert_snapshot!(rules_text(&rules), @"1. file-contents [all packages] jest.config.cjs (generated: project-dirs)");
        let value: serde_json::Value =
            serde_json::from_str(&rules_json(&rules).expect("json")).expect("parse");
        assert_eq!(value[0]["options"]["content"]["generated"]["generator"], "project-dirs");
    }

    #[test]
    fn convention_files_render_from_assets() {
        let ws = FixtureWorkspace::pnpm("demo-root", &["packages/*"]).expect("workspace");
        ws.package("packages/web", "web").expect("web");
        let root = locate(&FsHost, ws.root()).expect("locate");
        let ctx = FsWorkspaceContext::new(root);
        let templates = TemplateGenerator::new(assets_dir(), Arc::new(FsHost));

        let gitignore = render_convention_file(&templates, ".gitignore", &ctx).expect("static");
        assert!(gitignore.contains("node_modules"));

        let jest = render_convention_file(&templates, "jest.config.cjs", &ctx).expect("jest");
        assert!(jest.contains(r#""web""#));

        let err = render_convention_file(&templates, "README.md", &ctx).unwrap_err();
        assert!(err.to_string().contains("not a managed convention file"));
    }
}
