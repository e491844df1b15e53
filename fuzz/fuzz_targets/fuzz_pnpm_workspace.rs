//! Fuzz target for `pnpm-workspace.yaml` parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_pnpm_workspace
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = sanerepo_repo::fuzz::parse_pnpm_workspace(text);
    }
});
