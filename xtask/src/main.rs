//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use sanerepo_test_util::{fixture_names, fixtures_dir, repo_root};
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = ".sanerepo.json";

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    repo_root().join("schemas").into_std_path_buf()
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![SchemaSpec {
        filename: "sanerepo.settings.v1.json",
        generate: sanerepo_settings::settings_schema,
    }]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Check that the settings schema and the settings parser agree on every fixture.
///
/// A fixture's `.sanerepo.json` must either satisfy the schema and parse, or fail both.
/// Partition overlap is a semantic check the schema cannot express, so it is not
/// considered here.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(sanerepo_settings::settings_schema())
        .context("Failed to serialize settings schema")?;
    let validator = jsonschema::draft202012::new(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile settings schema: {e}"))?;
    println!("✓ settings schema compiles");

    let mut checked = 0;
    let mut errors = Vec::new();

    for name in fixture_names().context("Failed to list fixtures")? {
        let path = fixtures_dir().join(&name).join(SETTINGS_FILE);
        if !path.exists() {
            continue;
        }
        checked += 1;

        let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
        let parsed = sanerepo_settings::parse_settings_json(&text);
        let schema_ok = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(instance) => validator.is_valid(&instance),
            Err(_) => false,
        };

        match (schema_ok, &parsed) {
            (true, Ok(_)) => println!("✓ {name}: valid"),
            (false, Err(e)) => println!("✓ {name}: rejected ({e:#})"),
            (true, Err(e)) => errors.push(format!("{name}: schema accepts, parser rejects: {e:#}")),
            (false, Ok(_)) => errors.push(format!("{name}: parser accepts, schema rejects")),
        }
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for e in &errors {
            eprintln!("  - {e}");
        }
        bail!("{} fixture(s) disagree with the settings schema", errors.len());
    }

    println!("\nChecked {checked} settings file(s).");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Check fixture settings files against the settings schema");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
