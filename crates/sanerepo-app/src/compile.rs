//! The `compile` use case: locate the workspace, load settings, compile the rule list.

use anyhow::Context;
use camino::Utf8Path;
use sanerepo_repo::WorkspaceRoot;
use sanerepo_rules::PartitionConfig;
use sanerepo_template::TemplateGenerator;
use sanerepo_types::{Host, RuleList};
use std::sync::Arc;

/// Input for the compile use case.
#[derive(Clone)]
pub struct CompileInput<'a> {
    /// Directory to start the workspace search from.
    pub start_dir: &'a Utf8Path,
    /// Directory holding `files/` and `templates/`.
    pub assets_dir: &'a Utf8Path,
    /// Settings file name, relative to the workspace root.
    pub settings_file: &'a str,
    pub host: Arc<dyn Host>,
}

/// A located workspace and its partitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    pub root: WorkspaceRoot,
    pub partitions: PartitionConfig,
}

#[derive(Clone, Debug)]
pub struct CompileOutput {
    pub workspace: Workspace,
    pub rules: RuleList,
}

impl CompileInput<'_> {
    pub fn templates(&self) -> TemplateGenerator {
        TemplateGenerator::new(self.assets_dir, self.host.clone())
    }
}

/// Locate the workspace root and read its settings.
pub fn open_workspace(
    host: &dyn Host,
    start_dir: &Utf8Path,
    settings_file: &str,
) -> anyhow::Result<Workspace> {
    let root = sanerepo_repo::locate(host, start_dir).context("locate workspace root")?;
    let partitions = sanerepo_repo::load_settings_from(host, &root.path, settings_file)
        .context("load settings")?;
    Ok(Workspace { root, partitions })
}

/// Run the compile use case.
pub fn run_compile(input: &CompileInput<'_>) -> anyhow::Result<CompileOutput> {
    let workspace = open_workspace(input.host.as_ref(), input.start_dir, input.settings_file)?;
    let templates = input.templates();

    let rules = sanerepo_rules::compile(
        &sanerepo_rules::CompileInput {
            workspace_root: &workspace.root.path,
            root_package_name: workspace.root.root_package_name(),
            partitions: &workspace.partitions,
        },
        &templates,
    )
    .context("compile rule list")?;

    Ok(CompileOutput { workspace, rules })
}
