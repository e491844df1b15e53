//! Fuzz target for splicing package names into a template.
//!
//! Goal: splicing **never panics** and never adds placeholder occurrences.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_placeholder_splice
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sanerepo_template::{PROJECT_DIRS_PLACEHOLDER, ProjectDirsGenerator};

#[derive(Arbitrary, Debug)]
struct SpliceInput {
    template: String,
    names: Vec<String>,
}

fuzz_target!(|input: SpliceInput| {
    if input.template.len() > 16 * 1024 || input.names.len() > 100 {
        return;
    }
    let Ok(generator) =
        ProjectDirsGenerator::from_template("/fuzz/jest.config.cjs", input.template.as_str())
    else {
        return;
    };

    let before = input.template.matches(PROJECT_DIRS_PLACEHOLDER).count();
    let spliced = generator.splice(
        input
            .names
            .iter()
            .filter(|n| !n.contains(PROJECT_DIRS_PLACEHOLDER)),
    );
    assert!(spliced.matches(PROJECT_DIRS_PLACEHOLDER).count() <= before);
});
