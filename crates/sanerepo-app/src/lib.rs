//! Use case orchestration for sanerepo.
//!
//! This crate provides the application layer: use cases that coordinate the repo adapters,
//! the settings parser, the rule compiler and rendering. It is intentionally thin.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod compile;
mod materialize;
mod render;
mod settings;

pub use compile::{CompileInput, CompileOutput, Workspace, open_workspace, run_compile};
pub use materialize::{materialize, materialize_blocking};
pub use render::{OutputFormat, render_convention_file, render_rules, rules_json, rules_text};
pub use settings::{settings_document, settings_json};
