// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests verify the substitution engine's invariants over arbitrary
//! inputs: values without delimiters are fixed points, reference chains
//! expand fully up to the depth cap and truncate deterministically past it,
//! and the newtypes round-trip.

use proptest::prelude::*;
use refcfg::adapters::{MapSource, PropertiesParser};
use refcfg::domain::{resolver, ConfigKey, ConfigValue, PropertyStore};
use refcfg::ports::PropertyParser;

proptest! {
    // Any value without delimiters comes back from the store verbatim.
    #[test]
    fn brace_free_values_are_fixed_points(
        key in "[a-z][a-z0-9.]{0,15}",
        value in "[^{}]*"
    ) {
        let mut store = PropertyStore::new();
        store.set(key.as_str(), value.as_str());
        let resolved = store.get_str(&key).unwrap();
        prop_assert_eq!(resolved.as_str(), value.as_str());
    }
}

proptest! {
    // The resolver is the identity over whole tables without delimiters.
    #[test]
    fn resolver_is_identity_without_braces(
        table in prop::collection::hash_map("[a-z]{1,8}", "[^{}]*", 1..8)
    ) {
        let lookup = |k: &str| table.get(k).cloned();
        for (key, raw) in &table {
            let resolved = resolver::resolve(key, 0, &lookup);
            prop_assert_eq!(
                resolved.as_deref(),
                Some(raw.as_str())
            );
        }
    }
}

proptest! {
    // A chain of n references expands fully for n <= 5 and truncates at the
    // sixth level otherwise, independent of the chain length beyond it.
    #[test]
    fn chains_expand_up_to_the_depth_cap(n in 1usize..9) {
        let mut pairs: Vec<(String, String)> = (0..n)
            .map(|i| (format!("k{}", i), format!("{{k{}}}", i + 1)))
            .collect();
        pairs.push((format!("k{}", n), "end".to_string()));

        let mut store = PropertyStore::new();
        let source = MapSource::new(
            "chain",
            pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect::<Vec<_>>(),
        );
        store.load(&source).unwrap();

        let expected = if n <= 5 {
            "end".to_string()
        } else {
            // Substitution stops after splicing in k5's value.
            "{k6}".to_string()
        };
        let resolved = store.get_str("k0").unwrap();
        prop_assert_eq!(resolved.as_str(), expected.as_str());
    }
}

proptest! {
    // Re-running the pass over an already-resolved table changes nothing
    // when no value carries delimiters.
    #[test]
    fn unrelated_mutations_leave_brace_free_values_alone(
        table in prop::collection::hash_map("[a-z]{1,8}", "[^{}]*", 1..8)
    ) {
        let mut store = PropertyStore::new();
        store.extend(table.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        store.set("zzz.trigger", "mutation");

        for (key, raw) in &table {
            if key == "zzz.trigger" {
                continue;
            }
            let resolved = store.get_str(key).unwrap();
            prop_assert_eq!(resolved.as_str(), raw.as_str());
        }
    }
}

proptest! {
    #[test]
    fn config_key_roundtrips(s in "\\PC*") {
        let key = ConfigKey::from(s.clone());
        prop_assert_eq!(key.as_str(), s.as_str());
        prop_assert_eq!(key.into_string(), s);
    }
}

proptest! {
    #[test]
    fn config_value_roundtrips(s in "\\PC*") {
        let value = ConfigValue::from(s.clone());
        prop_assert_eq!(value.as_str(), s.as_str());
        prop_assert_eq!(value.into_string(), s);
    }
}

proptest! {
    // Joining with the separator and splitting again recovers the parts.
    #[test]
    fn list_split_inverts_join(parts in prop::collection::vec("[a-z0-9]+", 1..6)) {
        let value = ConfigValue::from(parts.join(","));
        prop_assert_eq!(value.as_list(","), parts);
    }
}

proptest! {
    // One well-formed line parses to one trimmed pair.
    #[test]
    fn properties_lines_parse_to_trimmed_pairs(
        key in "[a-z][a-z0-9.]{0,15}",
        value in "[ -~]*"
    ) {
        let line = format!("{} = {}", key, value);
        let pairs = PropertiesParser::new().parse(&line).unwrap();
        prop_assert_eq!(pairs.len(), 1);
        prop_assert_eq!(pairs[0].0.as_str(), key.as_str());
        prop_assert_eq!(pairs[0].1.as_str(), value.trim());
    }
}
