//! Property tests for slicing, formatting and the partial registry.

use helper_lib::helpers::collections::{after, before, first, last};
use helper_lib::helpers::inflections::ordinalize;
use helper_lib::helpers::number_format::{add_commas, to_fixed};
use helper_lib::PartialRegistry;
use proptest::prelude::*;
use serde_json::{json, Value};

fn sequence() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(any::<i32>().prop_map(Value::from), 0..20)
}

proptest! {
    #[test]
    fn first_and_after_rebuild_the_sequence(items in sequence(), k in 0usize..25) {
        let k = k.min(items.len()) as f64;
        let rebuilt: Vec<Value> = first(&items, k).iter().chain(after(&items, k)).cloned().collect();
        prop_assert_eq!(rebuilt, items);
    }

    #[test]
    fn before_and_last_rebuild_the_sequence(items in sequence(), k in 0usize..25) {
        let k = k.min(items.len()) as f64;
        let rebuilt: Vec<Value> = before(&items, k).iter().chain(last(&items, k)).cloned().collect();
        prop_assert_eq!(rebuilt, items);
    }

    #[test]
    fn ordinal_suffix_follows_english_rules(n in 0u32..100_000) {
        let ordinal = ordinalize(&json!(n));
        let expected = match (n % 100, n % 10) {
            (11..=13, _) => "th",
            (_, 1) => "st",
            (_, 2) => "nd",
            (_, 3) => "rd",
            _ => "th",
        };
        prop_assert_eq!(ordinal, format!("{n}{expected}"));
    }

    #[test]
    fn add_commas_only_inserts_separators(n in any::<u64>()) {
        let grouped = add_commas(&n.to_string());
        prop_assert_eq!(grouped.replace(',', ""), n.to_string());

        let groups: Vec<&str> = grouped.split(',').collect();
        prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
        prop_assert!(groups[1..].iter().all(|group| group.len() == 3));
    }

    #[test]
    fn to_fixed_stays_within_half_a_unit(value in -1.0e6f64..1.0e6, digits in 0usize..7) {
        let formatted = to_fixed(value, digits);
        let fraction_len = formatted.split_once('.').map_or(0, |(_, fraction)| fraction.len());
        prop_assert_eq!(fraction_len, digits);

        let parsed: f64 = formatted.parse().unwrap();
        let tolerance = 0.5 * 10f64.powi(-(digits as i32)) + 1e-9;
        prop_assert!((parsed - value).abs() <= tolerance);
    }

    #[test]
    fn registry_returns_fragments_once(fragments in prop::collection::vec("[a-z<>/ ]{0,12}", 1..8)) {
        let mut registry = PartialRegistry::new();
        for fragment in &fragments {
            registry.define("block", fragment.clone());
        }
        prop_assert_eq!(registry.consume("block"), fragments.join("\n"));
        prop_assert_eq!(registry.consume("block"), "");
    }
}
