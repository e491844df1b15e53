//! Fuzz target for `.sanerepo.json` parsing and partition resolution.
//!
//! Goal: parsing **never panics**; arbitrary bytes either yield partitions or an error.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_settings_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(cfg) = sanerepo_settings::parse_settings_json(text)
        && let Ok(partitions) = sanerepo_settings::resolve_partitions(cfg)
    {
        assert!(partitions.overlap().is_none(), "resolved partitions must be disjoint");
    }
});
