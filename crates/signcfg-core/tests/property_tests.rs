//! Property tests for duplicate detection and naming conventions

use std::collections::HashMap;

use proptest::prelude::*;
use signcfg_core::{NamingConvention, duplicate_values, secimage};

proptest! {
    #[test]
    fn duplicates_are_exactly_the_repeated_values(
        values in prop::collection::vec("[a-d]{1,2}", 0..20),
    ) {
        let duplicates = duplicate_values(values.iter().map(String::as_str));

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in &values {
            *counts.entry(value.as_str()).or_default() += 1;
        }
        let mut expected: Vec<&str> = counts
            .iter()
            .filter(|(_, n)| **n > 1)
            .map(|(v, _)| *v)
            .collect();
        expected.sort();

        let mut found: Vec<&str> = duplicates.iter().map(String::as_str).collect();
        found.sort();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn unique_values_have_no_duplicates(values in prop::collection::hash_set("[a-z]{1,8}", 0..20)) {
        prop_assert!(duplicate_values(values.iter().map(String::as_str)).is_empty());
    }

    #[test]
    fn secimage_names_match_with_any_suffix(stem in "[A-Za-z0-9_]{1,12}", suffix in "[a-z.]{0,6}") {
        let naming = NamingConvention::new(secimage::XML_NAME_REGEX).unwrap();
        let name = format!("{stem}_secimage.xml{suffix}");
        prop_assert!(naming.matches(&name));
    }

    #[test]
    fn names_with_leading_punctuation_never_match(stem in "[a-z0-9]{1,12}", lead in "[-.~ ]") {
        let naming = NamingConvention::new(secimage::XML_NAME_REGEX).unwrap();
        let name = format!("{lead}{stem}_secimage.xml");
        prop_assert!(!naming.matches(&name));
    }
}
