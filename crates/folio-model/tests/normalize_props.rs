//! Property tests for normalization
//!
//! Arbitrary JSON objects must always normalize into a complete project.

use folio_model::{derive_slug, normalize, RawProjectRecord, UNTITLED_SLUG};
use proptest::prelude::*;
use serde_json::{Map, Value};

const FIELDS: &[&str] = &[
    "title",
    "description",
    "status",
    "stars",
    "tags",
    "demo",
    "code",
    "cover",
    "alt",
    "timeline",
    "role",
    "slug",
];

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        ".{0,24}".prop_map(Value::String),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::vec(("[a-z]{1,6}", inner), 0..3)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
        ]
    })
}

fn arb_record() -> impl Strategy<Value = Value> {
    proptest::collection::vec((0..FIELDS.len(), arb_value()), 0..FIELDS.len()).prop_map(|pairs| {
        let mut map = Map::new();
        for (idx, value) in pairs {
            map.insert(FIELDS[idx].to_string(), value);
        }
        Value::Object(map)
    })
}

proptest! {
    #[test]
    fn prop_normalize_is_total(value in arb_record()) {
        let raw: RawProjectRecord = serde_json::from_value(value).unwrap();
        let project = normalize(&raw);

        // Invariant: display strings that carry defaults are never blank
        prop_assert!(!project.title.trim().is_empty());
        prop_assert!(!project.description.trim().is_empty());
        prop_assert!(!project.demo.is_empty());
        prop_assert!(!project.code.is_empty());
        prop_assert!(!project.alt.is_empty());
        prop_assert!(!project.slug.is_empty());
        prop_assert!(!project.cover.fallback.is_empty());
    }

    #[test]
    fn prop_derived_slug_shape(title in ".{0,40}") {
        let slug = derive_slug(&title);

        prop_assert!(!slug.is_empty());
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
        prop_assert!(slug == UNTITLED_SLUG
            || slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn prop_derived_slug_is_idempotent(title in "[A-Za-z0-9 _!.-]{0,40}") {
        let once = derive_slug(&title);
        prop_assert_eq!(derive_slug(&once), once.clone());
    }
}
