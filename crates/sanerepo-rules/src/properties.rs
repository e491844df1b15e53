//! Property-based tests for rule compilation.
//!
//! These tests use proptest to verify invariants around:
//! - conditional emission of partition rules
//! - exclusion lists of plain-package rules
//! - determinism of the compiled list

use crate::policy::PartitionConfig;
use crate::presets;
use crate::test_support::{compile_with, shape_rules};
use proptest::prelude::*;
use sanerepo_types::{RuleKind, RuleOptions};

// Rules emitted regardless of partitions: root files + jest + root scripts + plain (2)
// + workspace-wide (7).
fn base_rule_count() -> usize {
    presets::ROOT_FILES.len() + 1 + 1 + 2 + 7
}

fn arb_package_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,15}").unwrap()
}

/// Two disjoint partitions.
fn arb_partitions() -> impl Strategy<Value = PartitionConfig> {
    (
        prop::collection::vec(arb_package_name(), 0..5),
        prop::collection::vec(arb_package_name(), 0..5),
    )
        .prop_map(|(esm, cjs)| {
            let esm: Vec<String> = esm.into_iter().map(|n| format!("esm-{n}")).collect();
            let cjs: Vec<String> = cjs.into_iter().map(|n| format!("cjs-{n}")).collect();
            PartitionConfig::new(esm, cjs)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn partition_rules_emitted_only_when_non_empty(partitions in arb_partitions()) {
        let rules = compile_with(&partitions);

        let expected = base_rule_count()
            + if partitions.esm_only.is_empty() { 0 } else { 2 }
            + if partitions.cjs_only.is_empty() { 0 } else { 2 };
        prop_assert_eq!(rules.len(), expected);

        for rule in rules.iter() {
            if let Some(include) = &rule.scope.include_packages {
                prop_assert!(!include.is_empty());
            }
        }

        if !partitions.esm_only.is_empty() {
            let names: Vec<&str> = partitions.esm_only.iter().map(String::as_str).collect();
            prop_assert_eq!(shape_rules(&rules, &names).len(), 2);
        }
        if !partitions.cjs_only.is_empty() {
            let names: Vec<&str> = partitions.cjs_only.iter().map(String::as_str).collect();
            prop_assert_eq!(shape_rules(&rules, &names).len(), 2);
        }
    }

    #[test]
    fn plain_rules_exclude_exactly_the_partitioned_packages(partitions in arb_partitions()) {
        let rules = compile_with(&partitions);
        let plain_entry = rules
            .of_kind(RuleKind::PackageEntry)
            .next()
            .expect("plain entry rule is always emitted");

        prop_assert!(plain_entry.scope.include_packages.is_none());
        prop_assert_eq!(&plain_entry.scope.exclude_packages, &partitions.partitioned());
        prop_assert_eq!(plain_entry.scope.is_all_packages(), partitions.is_empty());

        for name in partitions.partitioned() {
            prop_assert!(!plain_entry.scope.matches(&name, false));
        }
        prop_assert!(plain_entry.scope.matches("unpartitioned-pkg", false));
    }

    #[test]
    fn every_package_gets_exactly_one_entry_shape(
        partitions in arb_partitions(),
        probe in arb_package_name(),
    ) {
        let rules = compile_with(&partitions);
        let mut candidates: Vec<String> = partitions.partitioned();
        candidates.push(format!("plain-{probe}"));

        for name in candidates {
            let matching = rules
                .iter()
                .filter(|r| matches!(r.options, RuleOptions::PackageEntry { .. }))
                .filter(|r| r.scope.matches(&name, false))
                .count();
            prop_assert_eq!(matching, 1, "package {}", name);
        }
    }

    #[test]
    fn compile_is_deterministic(partitions in arb_partitions()) {
        prop_assert_eq!(compile_with(&partitions), compile_with(&partitions));
    }
}
