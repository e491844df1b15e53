//! Bundled conventions.
//!
//! Keep these small and readable: they are data, not logic. Anything a repository wants to
//! vary goes through the partitions in `.sanerepo.json`.

use crate::policy::PackageShape;
use sanerepo_types::{DependencyRequirements, ScriptExpectation};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Root convention files, each backed by `assets/files/<name>`.
pub const ROOT_FILES: &[&str] = &[
    ".eslintrc.cjs",
    ".gitignore",
    ".husky/pre-commit",
    ".lintstagedrc",
    ".monorepolint.config.mjs",
    ".prettierignore",
    ".prettierrc",
    "pnpm-workspace.yaml",
    "tsconfig.base.json",
    "tsup.config.js",
    "turbo.json",
];

/// Test-runner config generated from `assets/templates/jest.config.cjs`.
pub const JEST_CONFIG: &str = "jest.config.cjs";

/// Scripts that legacy layouts defined per package and that must now be gone.
pub const RETIRED_PACKAGE_SCRIPTS: &[&str] = &[
    "check:prettier",
    "check:jest",
    "check:eslint",
    "check:typescript",
];

fn scripts<'a>(
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> BTreeMap<String, ScriptExpectation> {
    pairs
        .into_iter()
        .map(|(name, cmd)| (name.to_string(), ScriptExpectation::from(cmd)))
        .collect()
}

fn versions<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(name, range)| (name.to_string(), range.to_string()))
        .collect()
}

/// Orchestration scripts of the workspace root package.
pub fn root_scripts() -> BTreeMap<String, ScriptExpectation> {
    scripts([
        ("build", "turbo build"),
        ("check-eslint", "eslint packages/*/src"),
        (
            "check-jest",
            "NODE_OPTIONS='--experimental-vm-modules --no-warnings' jest --passWithNoTests",
        ),
        ("check-prettier", "prettier --check ."),
        (
            "check-typescript",
            "tsc --build --pretty packages/*/tsconfig.json",
        ),
        (
            "ci:publish-snapshot",
            "pnpm prepublishOnly && pnpm check-eslint && pnpm changeset version --snapshot && pnpm publish -r --tag snapshot --access public --report-summary --no-git-checks",
        ),
        (
            "ci:publish",
            "pnpm publish -r --tag next --access public --report-summary.json",
        ),
        (
            "cloc",
            "cloc --exclude-ext=yaml --exclude-ext=log --exclude-ext=txt --exclude-ext=json --match-d='src' --fullpath --not-match-d='node_modules|lib'  . ",
        ),
        (
            "debug:test",
            "NODE_OPTIONS='--experimental-vm-modules --no-warnings --inspect-brk' jest --runInBand --detectOpenHandles",
        ),
        (
            "dev-mode",
            "concurrently -c auto --color --names 'ts    ,eslint,jest  ' 'npm:watch-typescript' 'npm:watch-eslint' npm:watch-jest",
        ),
        ("fix-eslint", "eslint packages/*/src --fix"),
        ("fix-prettier", "prettier --write ."),
        ("precommit", "pnpm fix-eslint && pnpm fix-prettier"),
        ("prepare", "husky install"),
        ("prepublishOnly", "pnpm run build && pnpm test"),
        (
            "test",
            "pnpm check-eslint && pnpm check-jest && pnpm check-prettier && pnpm check-typescript",
        ),
        (
            "watch-eslint",
            "pnpm check-eslint; chokidar 'packages/*/src/**.ts' 'packages/*/src/**.tsx' -c eslint",
        ),
        ("watch-jest", "pnpm check-jest --watch"),
        (
            "watch-typescript",
            "pnpm check-typescript --preserveWatchOutput --watch",
        ),
    ])
}

/// Development dependencies the workspace root must declare.
pub fn root_dev_dependencies() -> DependencyRequirements {
    DependencyRequirements {
        dependencies: BTreeMap::new(),
        dev_dependencies: versions([
            ("@changesets/cli", "^2.26.1"),
            ("@monorepolint/cli", "^0.5.0-alpha.108"),
            ("@swc/jest", "^0.2.26"),
            ("@typescript-eslint/eslint-plugin", "^5.60.0"),
            ("@typescript-eslint/parser", "^5.60.0"),
            ("chokidar-cli", "^3.0.0"),
            ("concurrently", "^8.2.0"),
            ("eslint", "^8.43.0"),
            ("eslint-import-resolver-typescript", "^3.5.5"),
            ("eslint-plugin-import", "^2.27.5"),
            ("eslint-plugin-unused-imports", "^2.0.0"),
            ("husky", "^8.0.3"),
            ("jest", "^29.5.0"),
            ("lint-staged", "^13.2.2"),
            ("prettier", "^2.8.8"),
            ("ts-jest", "^29.1.0"),
            ("tslib", "^2.5.3"),
            ("tsup", "^7.0.0"),
            ("turbo", "^1.10.5"),
            ("typescript", "^5.1.3"),
        ]),
    }
}

/// Scripts every non-root package carries, plus retired scripts that must be absent.
pub fn package_scripts() -> BTreeMap<String, ScriptExpectation> {
    let mut out = scripts([
        ("clean", "rm -rf lib dist tsconfig.tsbuildinfo"),
        ("deepClean", "rm -rf lib dist tsconfig.tsbuildinfo"),
        ("check-typescript", "tsc --build"),
        (
            "prepublishOnly",
            "pnpm check-typescript && pnpm transpile-typescript",
        ),
        ("dev-mode", "pnpm transpile-typescript --watch"),
    ]);
    for name in RETIRED_PACKAGE_SCRIPTS {
        out.insert((*name).to_string(), ScriptExpectation::Absent);
    }
    out
}

/// Development dependencies every package must declare.
pub fn package_dev_dependencies() -> DependencyRequirements {
    DependencyRequirements {
        dependencies: BTreeMap::new(),
        dev_dependencies: versions([
            ("tslib", "^2.5.3"),
            ("typescript", "^5.1.3"),
            ("tsup", "^7.0.0"),
        ]),
    }
}

/// Canonical per-package `tsconfig.json`.
pub fn tsconfig_template() -> Value {
    json!({
        "extends": "../../tsconfig.base.json",
        "compilerOptions": {
            "outDir": "lib",
            "rootDir": "src",
        },
        "exclude": ["node_modules", "lib", "dist"],
    })
}

/// `package.json` entries that encode a packaging shape.
pub fn entries(shape: PackageShape) -> BTreeMap<String, Value> {
    let value = match shape {
        PackageShape::Dual => json!({
            "type": "module",
            "exports": {
                ".": {
                    "types": "./dist/index.d.ts",
                    "import": "./dist/index.js",
                    // Older layouts published this path with a trailing dot ("index.cjs.").
                    "require": "./dist/index.cjs",
                },
            },
            "files": ["bin", "lib", "files"],
            "publishConfig": { "access": "public" },
        }),
        PackageShape::EsmOnly => json!({
            "type": "module",
            "exports": {
                ".": {
                    "types": "./dist/index.d.ts",
                    "import": "./dist/index.js",
                },
            },
        }),
        PackageShape::CjsOnly => json!({
            "type": "commonjs",
            "exports": {
                ".": {
                    "types": "./dist/index.d.ts",
                    "require": "./dist/index.js",
                },
            },
        }),
    };
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}

/// The transpile script matching a packaging shape.
pub fn transpile_scripts(shape: PackageShape) -> BTreeMap<String, ScriptExpectation> {
    let cmd = match shape {
        PackageShape::Dual => "tsup --format esm,cjs",
        PackageShape::EsmOnly => "tsup --format esm",
        PackageShape::CjsOnly => "tsup --format cjs",
    };
    scripts([("transpile-typescript", cmd)])
}
