//! Fuzz target for workspace member glob selection.
//!
//! Goal: selection **never panics** on any input. Invalid patterns may error.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_member_globs
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct GlobInput {
    /// Member patterns, e.g. "packages/*" or "!apps/sandbox".
    patterns: Vec<String>,
    /// Root-relative candidate directories.
    candidates: Vec<String>,
}

fuzz_target!(|input: GlobInput| {
    if input.patterns.len() > 20 || input.candidates.len() > 100 {
        return;
    }

    let patterns: Vec<String> = input
        .patterns
        .into_iter()
        .filter(|p| p.len() <= 256)
        .collect();
    let candidates: Vec<String> = input
        .candidates
        .into_iter()
        .filter(|c| c.len() <= 512)
        .collect();

    if let Ok(members) = sanerepo_repo::fuzz::select_members(&patterns, &candidates) {
        assert!(members.windows(2).all(|w| w[0] < w[1]), "members are sorted and unique");
    }
});
