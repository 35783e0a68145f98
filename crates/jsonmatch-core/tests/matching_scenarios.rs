//! End-to-end matching scenarios over the public API.
#![allow(clippy::expect_used)]

use serde_json::json;

use jsonmatch_core::{
    match_documents, n_way_match_all, n_way_match_pivot, ComponentId, Document, Group, MatchConfig,
};

fn doc(components: serde_json::Value) -> Document {
    Document::from_value(json!({ "components": components })).expect("document")
}

fn contains(group: &Group, doc_id: usize, comp_id: usize) -> bool {
    group.contains(&ComponentId {
        doc_id,
        comp_id,
        cost: 0.0,
    })
}

// ---------------------------------------------------------------------------
// Scenario: identity
// ---------------------------------------------------------------------------

#[test]
fn identical_components_across_two_documents() {
    let docs = [doc(json!([{"a": 1}])), doc(json!([{"a": 1}]))];
    let config = MatchConfig::default();

    let matches = match_documents(&docs[0], &docs[1], &config).expect("pair");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].cost, 0.0);

    let groups = n_way_match_pivot(&docs, &config).expect("pivot");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

// ---------------------------------------------------------------------------
// Scenario: one swap
// ---------------------------------------------------------------------------

#[test]
fn swapped_component_order_still_pairs_correctly() {
    let x = json!({"name": "openssl", "version": "3.0.1"});
    let y = json!({"name": "zlib", "version": "1.2.13"});
    let x2 = json!({"name": "openssl", "version": "3.0.2"});
    let y2 = json!({"name": "zlib", "version": "1.2.14"});

    let docs = [doc(json!([x, y])), doc(json!([y2, x2]))];
    let mut matches =
        match_documents(&docs[0], &docs[1], &MatchConfig::default()).expect("pair");
    matches.sort_by_key(|m| m.query_comp);

    assert_eq!(matches.len(), 2);
    // X pairs with X' (target index 1), Y with Y' (target index 0).
    assert_eq!((matches[0].query_comp, matches[0].target_comp), (0, 1));
    assert_eq!((matches[1].query_comp, matches[1].target_comp), (1, 0));
}

// ---------------------------------------------------------------------------
// Scenario: size asymmetry
// ---------------------------------------------------------------------------

#[test]
fn three_against_one_produces_exactly_one_match() {
    let docs = [
        doc(json!([{"a": 1}, {"b": 2}, {"c": 3}])),
        doc(json!([{"b": 2}])),
    ];
    let matches = match_documents(&docs[0], &docs[1], &MatchConfig::default()).expect("pair");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].query_comp, 1);
    assert_eq!(matches[0].target_comp, 0);

    let groups = n_way_match_pivot(&docs, &MatchConfig::default()).expect("pivot");
    assert_eq!(groups.len(), 1);
    assert!(contains(&groups[0], 0, 1));
    assert!(contains(&groups[0], 1, 0));
}

// ---------------------------------------------------------------------------
// Scenario: threshold filter
// ---------------------------------------------------------------------------

#[test]
fn matches_above_the_threshold_are_dropped() {
    // Thirty renamed leaves: distance 30 under unit costs.
    let a: Vec<serde_json::Value> = (0..30).map(|i| json!(i)).collect();
    let b: Vec<serde_json::Value> = (100..130).map(|i| json!(i)).collect();
    let docs = [doc(json!([a])), doc(json!([b]))];

    let groups = n_way_match_pivot(&docs, &MatchConfig::default()).expect("pivot");
    assert!(groups.is_empty(), "cost 30 must not pass cost_thresh 25");

    let relaxed = MatchConfig {
        cost_thresh: 30.0,
        ..MatchConfig::default()
    };
    let groups = n_way_match_pivot(&docs, &relaxed).expect("pivot");
    assert_eq!(groups.len(), 1);
}

#[test]
fn no_emitted_match_ever_exceeds_the_threshold() {
    let docs = [
        doc(json!([{"a": 1}, {"b": [1, 2, 3]}, "loose string"])),
        doc(json!([{"a": 2}, {"b": [1, 2]}, 17])),
        doc(json!([{"c": {"d": 4}}, null])),
    ];
    let config = MatchConfig {
        cost_thresh: 3.0,
        ..MatchConfig::default()
    };
    for p in 0..docs.len() {
        for k in 0..docs.len() {
            if p == k {
                continue;
            }
            for m in match_documents(&docs[p], &docs[k], &config).expect("pair") {
                assert!(m.cost <= config.cost_thresh, "match cost {}", m.cost);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario: transitive chain
// ---------------------------------------------------------------------------

#[test]
fn indirect_matches_chain_into_one_group() {
    // A↔B and B↔C are within range; A↔C (distance 3) is not.
    let docs = [
        doc(json!([{"name": "x", "v": 1}])),
        doc(json!([{"name": "x"}])),
        doc(json!([{"name": "y"}])),
    ];
    let config = MatchConfig {
        cost_thresh: 2.0,
        ..MatchConfig::default()
    };

    // No direct A↔C match.
    assert!(match_documents(&docs[0], &docs[2], &config)
        .expect("pair")
        .is_empty());

    let groups = n_way_match_all(&docs, &config).expect("all");
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert!(contains(group, 0, 0));
    assert!(contains(group, 1, 0));
    assert!(contains(group, 2, 0));
}

// ---------------------------------------------------------------------------
// Scenario: sort_keys
// ---------------------------------------------------------------------------

#[test]
fn sort_keys_makes_member_order_irrelevant_in_encoding() {
    let a = Document::from_json_str(r#"{"components": [{"b": 1, "a": 2}]}"#).expect("doc");
    let b = Document::from_json_str(r#"{"components": [{"a": 2, "b": 1}]}"#).expect("doc");

    assert_eq!(a.prepare(true).brackets, b.prepare(true).brackets);
    assert_ne!(a.prepare(false).brackets, b.prepare(false).brackets);
}

// ---------------------------------------------------------------------------
// Group closure
// ---------------------------------------------------------------------------

#[test]
fn groups_partition_the_matched_components() {
    let docs = [
        doc(json!([{"a": 1}, {"b": 2}])),
        doc(json!([{"a": 1}, {"c": 3}])),
        doc(json!([{"b": 2}, {"c": 3}])),
    ];
    let groups = n_way_match_all(&docs, &MatchConfig::default()).expect("all");

    let mut seen = std::collections::HashSet::new();
    for group in &groups {
        assert!(!group.is_empty());
        for c in group {
            assert!(
                seen.insert((c.doc_id, c.comp_id)),
                "component {c} in two groups"
            );
        }
    }
}

#[test]
fn realistic_component_documents_group_plausibly() {
    // Three CycloneDX-ish documents listing overlapping libraries.
    let lib = |name: &str, version: &str| {
        json!({
            "type": "library",
            "name": name,
            "version": version,
            "licenses": [{"license": {"id": "Apache-2.0"}}]
        })
    };
    let docs = [
        doc(json!([
            lib("openssl", "3.0.1"),
            lib("zlib", "1.2.13"),
            lib("libcurl", "8.0.0")
        ])),
        doc(json!([lib("zlib", "1.2.13"), lib("openssl", "3.0.2")])),
        doc(json!([lib("openssl", "3.0.1")])),
    ];

    let groups = n_way_match_pivot(&docs, &MatchConfig::default()).expect("pivot");

    // openssl and zlib each form a cross-document group; libcurl matches
    // nothing and appears in no group.
    assert_eq!(groups.len(), 2);
    let total: usize = groups.iter().map(Vec::len).sum();
    assert_eq!(total, 5);
    for group in &groups {
        assert!(!contains(group, 0, 2), "libcurl must stay unmatched");
    }
}
