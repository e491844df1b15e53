use crate::kinds;
use crate::policy::{PackageShape, Partition, PartitionConfig};
use crate::presets;
use camino::Utf8Path;
use sanerepo_template::TemplateGenerator;
use sanerepo_types::{FileContent, PackageFilter, Result, RuleList};
use std::sync::Arc;

#[derive(Clone, Copy, Debug)]
pub struct CompileInput<'a> {
    pub workspace_root: &'a Utf8Path,
    /// `name` from the root `package.json` (or the root path when it has none).
    pub root_package_name: &'a str,
    pub partitions: &'a PartitionConfig,
}

impl CompileInput<'_> {
    /// The workspace root package and nothing else.
    fn root_scope(&self) -> PackageFilter {
        PackageFilter::only([self.root_package_name]).with_workspace_root(true)
    }
}

/// Compile the ordered rule list.
///
/// Emission order: root convention files, the generated test-runner config, root scripts,
/// plain-package shape rules, partition shape rules (only for non-empty partitions), then
/// workspace-wide rules. Any template failure aborts the whole compile.
pub fn compile(input: &CompileInput<'_>, templates: &TemplateGenerator) -> Result<RuleList> {
    let mut rules = RuleList::new();

    root_files(input, templates, &mut rules)?;
    root_scripts(input, &mut rules)?;
    plain_packages(input.partitions, &mut rules)?;
    for partition in [Partition::EsmOnly, Partition::CjsOnly] {
        partition_rules(input.partitions, partition, &mut rules)?;
    }
    workspace_rules(input, &mut rules)?;

    tracing::debug!(
        workspace_root = %input.workspace_root,
        root_package = input.root_package_name,
        rules = rules.len(),
        "compiled rule list"
    );
    Ok(rules)
}

fn root_files(
    input: &CompileInput<'_>,
    templates: &TemplateGenerator,
    rules: &mut RuleList,
) -> Result<()> {
    for file in presets::ROOT_FILES {
        let content = FileContent::Static(templates.render_static(file)?);
        rules.push(kinds::file_contents(input.root_scope(), file, content)?);
    }

    let generator = templates.project_dirs(presets::JEST_CONFIG)?;
    rules.push(kinds::file_contents(
        input.root_scope(),
        presets::JEST_CONFIG,
        FileContent::Generated(Arc::new(generator)),
    )?);
    Ok(())
}

fn root_scripts(input: &CompileInput<'_>, rules: &mut RuleList) -> Result<()> {
    rules.push(kinds::package_script(
        input.root_scope(),
        presets::root_scripts(),
    )?);
    Ok(())
}

/// Packages in neither partition get the dual-format shape.
fn plain_packages(partitions: &PartitionConfig, rules: &mut RuleList) -> Result<()> {
    let scope = PackageFilter::excluding(partitions.partitioned());

    rules.push(kinds::package_entry(
        scope.clone(),
        presets::entries(PackageShape::Dual),
    )?);
    rules.push(kinds::package_script(
        scope,
        presets::transpile_scripts(PackageShape::Dual),
    )?);
    Ok(())
}

fn partition_rules(
    partitions: &PartitionConfig,
    partition: Partition,
    rules: &mut RuleList,
) -> Result<()> {
    let members = partitions.members(partition);
    if members.is_empty() {
        tracing::debug!(partition = partition.as_str(), "partition empty; no rules emitted");
        return Ok(());
    }

    let scope = PackageFilter::only(members.iter().cloned());
    let shape = partition.shape();
    rules.push(kinds::package_entry(scope.clone(), presets::entries(shape))?);
    rules.push(kinds::package_script(
        scope,
        presets::transpile_scripts(shape),
    )?);
    Ok(())
}

fn workspace_rules(input: &CompileInput<'_>, rules: &mut RuleList) -> Result<()> {
    let everyone_and_root = PackageFilter::all().with_workspace_root(true);

    rules.push(kinds::require_dependency(
        input.root_scope(),
        presets::root_dev_dependencies(),
    )?);
    rules.push(kinds::package_script(
        PackageFilter::all(),
        presets::package_scripts(),
    )?);
    rules.push(kinds::standard_tsconfig(
        PackageFilter::all(),
        presets::tsconfig_template(),
    )?);
    rules.push(kinds::require_dependency(
        PackageFilter::all(),
        presets::package_dev_dependencies(),
    )?);
    rules.push(kinds::package_order(everyone_and_root.clone()));
    rules.push(kinds::alphabetical_dependencies(everyone_and_root.clone()));
    rules.push(kinds::alphabetical_scripts(everyone_and_root));
    Ok(())
}
