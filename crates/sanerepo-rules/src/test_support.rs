use crate::compile::{CompileInput, compile};
use crate::policy::PartitionConfig;
use crate::presets;
use camino::{Utf8Path, Utf8PathBuf};
use sanerepo_template::TemplateGenerator;
use sanerepo_types::{Host, RuleDescriptor, RuleList};
use std::sync::Arc;

pub struct StdHost;

impl Host for StdHost {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.exists()
    }

    fn read_file(&self, path: &Utf8Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// The repository's bundled assets directory.
pub fn bundled_assets() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Utf8Path::parent)
        .expect("crates/sanerepo-rules sits two levels below the repo root")
        .join("assets")
}

pub fn templates() -> TemplateGenerator {
    TemplateGenerator::new(bundled_assets(), Arc::new(StdHost))
}

pub fn compile_with(partitions: &PartitionConfig) -> RuleList {
    let input = CompileInput {
        workspace_root: Utf8Path::new("/work/sane"),
        root_package_name: "sane-root",
        partitions,
    };
    compile(&input, &templates()).expect("compile with bundled assets")
}

pub fn jest_rule(rules: &RuleList) -> &RuleDescriptor {
    rules
        .file_rule(presets::JEST_CONFIG)
        .expect("jest config rule")
}

/// Rules whose include list is exactly `names`.
pub fn shape_rules<'a>(rules: &'a RuleList, names: &[&str]) -> Vec<&'a RuleDescriptor> {
    rules
        .iter()
        .filter(|r| {
            r.scope
                .include_packages
                .as_ref()
                .is_some_and(|inc| inc.iter().map(String::as_str).eq(names.iter().copied()))
        })
        .collect()
}
