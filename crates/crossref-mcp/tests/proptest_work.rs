//! Property-based tests for work normalization.

use crossref_mcp::models::{DateParts, NormalizedWork, RawAuthor, RawWork, normalize};
use proptest::prelude::*;

const NORMALIZED_KEYS: [&str; 11] = [
    "title",
    "authors",
    "published",
    "type",
    "doi",
    "url",
    "container",
    "publisher",
    "issue",
    "volume",
    "abstract",
];

fn arb_author() -> impl Strategy<Value = RawAuthor> {
    (
        proptest::option::of("[A-Za-z .-]{0,20}"),
        proptest::option::of("[A-Za-z' -]{0,20}"),
    )
        .prop_map(|(given, family)| RawAuthor { given, family })
}

fn arb_date() -> impl Strategy<Value = DateParts> {
    proptest::collection::vec(
        proptest::collection::vec(proptest::option::of(1i32..3000), 0..4),
        0..3,
    )
    .prop_map(|date_parts| DateParts { date_parts })
}

/// Generate arbitrary RawWork structs, every field independently absent.
fn arb_work() -> impl Strategy<Value = RawWork> {
    (
        proptest::collection::vec("[A-Za-z0-9 :*]{0,40}", 0..3),
        proptest::collection::vec(arb_author(), 0..5),
        proptest::option::of(arb_date()),
        proptest::option::of("10\\.[0-9]{4}/[a-z0-9.]{1,12}"),
        proptest::option::of("(journal-article|book-chapter|)"),
        proptest::option::of("[A-Za-z ]{0,30}"),
        proptest::option::of("[0-9]{0,4}"),
        proptest::collection::vec("[A-Za-z ]{0,30}", 0..2),
    )
        .prop_map(
            |(title, author, published, doi, work_type, publisher, volume, container_title)| {
                RawWork {
                    title,
                    author,
                    published,
                    doi,
                    work_type,
                    publisher,
                    volume,
                    container_title,
                    ..Default::default()
                }
            },
        )
}

proptest! {
    /// Normalization is total: always succeeds and always emits every key.
    #[test]
    fn normalize_is_total(work in arb_work()) {
        let normalized = normalize(Some(&work)).expect("some record normalizes");
        let value = serde_json::to_value(&normalized).expect("serialize");
        let object = value.as_object().expect("object");

        prop_assert_eq!(object.len(), NORMALIZED_KEYS.len());
        for key in NORMALIZED_KEYS {
            prop_assert!(object.contains_key(key), "missing key {}", key);
        }
    }

    /// Author names never carry stray outer whitespace.
    #[test]
    fn author_names_are_trimmed(work in arb_work()) {
        let normalized = NormalizedWork::from(&work);
        prop_assert_eq!(normalized.authors.len(), work.author.len());
        for author in &normalized.authors {
            prop_assert_eq!(author.name.trim(), author.name.as_str());
        }
    }

    /// The date string is exactly the flattened parts joined with '-'.
    #[test]
    fn date_string_matches_parts(work in arb_work()) {
        let normalized = NormalizedWork::from(&work);
        prop_assert_eq!(normalized.published.is_some(), work.published.is_some());

        if let Some(published) = normalized.published {
            let joined: Vec<String> =
                published.date_parts.iter().map(ToString::to_string).collect();
            match published.date_string {
                Some(s) => prop_assert_eq!(s, joined.join("-")),
                None => prop_assert!(published.date_parts.is_empty()),
            }
        }
    }

    /// Normalized strings are never empty: empty upstream values become null.
    #[test]
    fn no_empty_strings(work in arb_work()) {
        let normalized = NormalizedWork::from(&work);
        let fields = [
            &normalized.title,
            &normalized.work_type,
            &normalized.publisher,
            &normalized.container,
        ];
        for field in fields {
            prop_assert!(field.as_deref() != Some(""));
        }
    }

    /// Raw work deserialization accepts any value in any field.
    #[test]
    fn raw_work_from_arbitrary_json_always_parses(
        title in proptest::option::of(".*"),
        year in proptest::option::of(any::<i64>()),
        given in proptest::option::of(".*"),
    ) {
        let json = serde_json::json!({
            "title": [title],
            "author": [{"given": given}],
            "published": {"date-parts": [[year]]},
        });

        let work = serde_json::from_value::<RawWork>(json);
        prop_assert!(work.is_ok());
        if let Ok(work) = work {
            prop_assert!(normalize(Some(&work)).is_ok());
        }
    }
}

#[test]
fn normalize_none_is_no_data() {
    let err = normalize(None).unwrap_err();
    let value = serde_json::to_value(err).unwrap();
    assert_eq!(value, serde_json::json!({"error": "No data available"}));
}
