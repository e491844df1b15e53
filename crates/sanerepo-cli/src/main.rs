//! CLI entry point for sanerepo.
//!
//! This module is intentionally thin: it handles argument parsing, logging setup, I/O, and
//! exit codes. All business logic lives in the `sanerepo-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use sanerepo_app::{
    CompileInput, OutputFormat, materialize_blocking, open_workspace, render_convention_file,
    render_rules, run_compile, settings_json,
};
use sanerepo_repo::{FsHost, FsWorkspaceContext};
use sanerepo_template::TemplateGenerator;
use sanerepo_types::ids::SETTINGS_FILE;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "SANEREPO_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "sanerepo",
    version,
    about = "Monorepo convention rules for JavaScript/TypeScript workspaces"
)]
struct Cli {
    /// Directory to start the workspace search from.
    #[arg(long, global = true, default_value = ".")]
    cwd: Utf8PathBuf,

    /// Directory holding `files/` and `templates/` (defaults to the bundled assets).
    #[arg(long, global = true, env = "SANEREPO_ASSETS")]
    assets: Option<Utf8PathBuf>,

    /// Settings file name, relative to the workspace root.
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    settings_file: String,

    /// Log debug events to stderr (overridden by SANEREPO_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile the rule list for the workspace.
    Rules {
        #[arg(long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,

        /// Resolve generated file content against the workspace.
        #[arg(long)]
        resolve: bool,

        /// Write the output here instead of stdout.
        #[arg(long)]
        out: Option<Utf8PathBuf>,
    },

    /// Print the expected content of a managed root file.
    Render {
        /// File name, e.g. `.prettierrc` or `jest.config.cjs`.
        file: String,
    },

    /// Print the effective package partitions as JSON.
    Settings,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("sanerepo error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cwd = cli
        .cwd
        .canonicalize_utf8()
        .with_context(|| format!("resolve --cwd {}", cli.cwd))?;
    tracing::debug!(cwd = %cwd, "starting");

    match &cli.cmd {
        Commands::Rules {
            format,
            resolve,
            out,
        } => {
            let assets = assets_dir(cli.assets.as_deref(), &checkout_assets_dir())?;
            cmd_rules(cli, &cwd, &assets, (*format).into(), *resolve, out.as_deref())
        }
        Commands::Render { file } => {
            let assets = assets_dir(cli.assets.as_deref(), &checkout_assets_dir())?;
            cmd_render(&cwd, &assets, file)
        }
        Commands::Settings => cmd_settings(cli, &cwd),
    }
}

/// `assets/` at the root of the source checkout this binary was built from.
fn checkout_assets_dir() -> Utf8PathBuf {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Utf8Path::parent)
        .unwrap_or(manifest_dir)
        .join("assets")
}

/// Pick the assets directory: an explicit one wins, otherwise the checkout's, which
/// only exists on the machine the binary was built on.
fn assets_dir(explicit: Option<&Utf8Path>, checkout: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if !checkout.is_dir() {
        anyhow::bail!(
            "no assets directory found at {checkout}; pass --assets or set SANEREPO_ASSETS"
        );
    }
    tracing::debug!(assets = %checkout, "using checkout assets");
    Ok(checkout.to_path_buf())
}

fn cmd_rules(
    cli: &Cli,
    cwd: &Utf8Path,
    assets: &Utf8Path,
    format: OutputFormat,
    resolve: bool,
    out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let input = CompileInput {
        start_dir: cwd,
        assets_dir: assets,
        settings_file: &cli.settings_file,
        host: Arc::new(FsHost),
    };
    let output = run_compile(&input)?;

    let rules = if resolve {
        let ctx = FsWorkspaceContext::new(output.workspace.root.clone());
        materialize_blocking(&output.rules, &ctx).context("resolve generated content")?
    } else {
        output.rules
    };

    let text = render_rules(&rules, format)?;
    match out {
        Some(path) => write_text_file(path, &text),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn cmd_render(cwd: &Utf8Path, assets: &Utf8Path, file: &str) -> anyhow::Result<()> {
    let root = sanerepo_repo::locate(&FsHost, cwd).context("locate workspace root")?;
    let ctx = FsWorkspaceContext::new(root);
    let templates = TemplateGenerator::new(assets, Arc::new(FsHost));

    let text = render_convention_file(&templates, file, &ctx)?;
    print!("{text}");
    Ok(())
}

fn cmd_settings(cli: &Cli, cwd: &Utf8Path) -> anyhow::Result<()> {
    let workspace = open_workspace(&FsHost, cwd, &cli.settings_file)?;
    print!("{}", settings_json(&workspace.partitions)?);
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write output: {path}"))?;
    Ok(())
}
