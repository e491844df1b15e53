//! Stable identifiers for rule kinds and well-known workspace files.
//!
//! Rule kind IDs are kebab-case and are part of the engine contract.

// Rule kinds
pub const RULE_FILE_CONTENTS: &str = "file-contents";
pub const RULE_PACKAGE_ENTRY: &str = "package-entry";
pub const RULE_PACKAGE_SCRIPT: &str = "package-script";
pub const RULE_PACKAGE_ORDER: &str = "package-order";
pub const RULE_ALPHABETICAL_DEPENDENCIES: &str = "alphabetical-dependencies";
pub const RULE_ALPHABETICAL_SCRIPTS: &str = "alphabetical-scripts";
pub const RULE_REQUIRE_DEPENDENCY: &str = "require-dependency";
pub const RULE_STANDARD_TSCONFIG: &str = "standard-tsconfig";

// Workspace files
pub const PACKAGE_MANIFEST: &str = "package.json";
pub const PNPM_WORKSPACE_MANIFEST: &str = "pnpm-workspace.yaml";
pub const SETTINGS_FILE: &str = ".sanerepo.json";

// Generators
pub const GENERATOR_PROJECT_DIRS: &str = "project-dirs";
