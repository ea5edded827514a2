use artifact_core::{Artifact, ArtifactFields, RecordStore};
use std::collections::HashSet;
use tempfile::TempDir;

fn new_store() -> (TempDir, RecordStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("artifacts.db"));
    store.create_table().unwrap();
    (dir, store)
}

fn vase() -> ArtifactFields {
    ArtifactFields::new("Vase", "Ming", "Ceramic", "Hall A")
}

fn coin() -> ArtifactFields {
    ArtifactFields::new("Coin", "Roman", "Metal", "Vault")
}

fn ids(artifacts: &[Artifact]) -> Vec<i64> {
    artifacts.iter().map(|artifact| artifact.id).collect()
}

fn contains_folded(artifact: &Artifact, keyword: &str) -> bool {
    let keyword = keyword.to_ascii_lowercase();
    artifact
        .fields
        .values()
        .into_iter()
        .flatten()
        .any(|value| value.to_ascii_lowercase().contains(&keyword))
}

#[test]
fn add_then_get_roundtrips_fields() {
    let (_dir, store) = new_store();

    let id = store.add(&vase()).unwrap();

    let loaded = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.fields, vase());
}

#[test]
fn add_assigns_unique_ids() {
    let (_dir, store) = new_store();

    let assigned: HashSet<_> = (0..5).map(|_| store.add(&coin()).unwrap()).collect();
    assert_eq!(assigned.len(), 5);
}

#[test]
fn add_stores_fields_verbatim() {
    let (_dir, store) = new_store();
    let fields = ArtifactFields {
        name: Some("  padded  ".to_string()),
        collection: Some(String::new()),
        category: None,
        location: Some("Hall A; DROP TABLE artifacts;--".to_string()),
    };

    let id = store.add(&fields).unwrap();

    assert_eq!(store.get_by_id(id).unwrap().unwrap().fields, fields);
}

#[test]
fn get_missing_id_returns_none() {
    let (_dir, store) = new_store();
    assert!(store.get_by_id(42).unwrap().is_none());
}

#[test]
fn find_by_keyword_matches_any_field() {
    let (_dir, store) = new_store();
    let vase_id = store.add(&vase()).unwrap();
    let coin_id = store.add(&coin()).unwrap();

    assert_eq!(ids(&store.find_by_keyword("Vas").unwrap()), vec![vase_id]);
    assert_eq!(ids(&store.find_by_keyword("Roman").unwrap()), vec![coin_id]);
    assert_eq!(ids(&store.find_by_keyword("Ceram").unwrap()), vec![vase_id]);
    assert_eq!(ids(&store.find_by_keyword("ault").unwrap()), vec![coin_id]);
    assert!(store.find_by_keyword("Bronze").unwrap().is_empty());
}

#[test]
fn find_by_keyword_agrees_with_substring_check() {
    let (_dir, store) = new_store();
    store.add(&vase()).unwrap();
    store.add(&coin()).unwrap();
    store
        .add(&ArtifactFields::new("Mask", "Aztec", "Stone", "Hall B"))
        .unwrap();

    let all = store.find_by_keyword("").unwrap();
    for keyword in ["Hall", "a", "ROMAN", "stone", "hall a", "Hall B", "zzz"] {
        let expected: Vec<i64> = all
            .iter()
            .filter(|artifact| contains_folded(artifact, keyword))
            .map(|artifact| artifact.id)
            .collect();
        assert_eq!(ids(&store.find_by_keyword(keyword).unwrap()), expected, "{keyword}");
    }
}

#[test]
fn find_by_keyword_folds_ascii_case() {
    let (_dir, store) = new_store();
    let id = store.add(&coin()).unwrap();

    assert_eq!(ids(&store.find_by_keyword("roman").unwrap()), vec![id]);
    assert_eq!(ids(&store.find_by_keyword("VAULT").unwrap()), vec![id]);
}

#[test]
fn find_by_keyword_treats_wildcards_literally() {
    let (_dir, store) = new_store();
    let discount = store
        .add(&ArtifactFields::new("50% replica", "Gift", "Shop", "Lobby"))
        .unwrap();
    store.add(&coin()).unwrap();

    assert_eq!(ids(&store.find_by_keyword("%").unwrap()), vec![discount]);
    assert!(store.find_by_keyword("_oin").unwrap().is_empty());
}

#[test]
fn oversized_keyword_returns_empty_result() {
    let (_dir, store) = new_store();
    store.add(&vase()).unwrap();

    assert!(store.find_by_keyword(&"x".repeat(50_001)).unwrap().is_empty());
    assert!(store.find_by_keyword(&"%".repeat(25_000)).unwrap().is_empty());
}

#[test]
fn oversized_keyword_still_matches_long_field() {
    let (_dir, store) = new_store();
    let long_name = format!("Scroll {}", "y".repeat(60_000));
    let id = store
        .add(&ArtifactFields::new(long_name, "Edo", "Paper", "Archive"))
        .unwrap();

    let hits = store.find_by_keyword(&"Y".repeat(60_000)).unwrap();
    assert_eq!(ids(&hits), vec![id]);
}

#[test]
fn empty_keyword_returns_all_in_insertion_order() {
    let (_dir, store) = new_store();
    let first = store.add(&vase()).unwrap();
    let second = store.add(&ArtifactFields::default()).unwrap();
    let third = store.add(&coin()).unwrap();

    assert_eq!(
        ids(&store.find_by_keyword("").unwrap()),
        vec![first, second, third]
    );
}

#[test]
fn absent_fields_do_not_match_keywords() {
    let (_dir, store) = new_store();
    store.add(&ArtifactFields::default()).unwrap();

    assert!(store.find_by_keyword("a").unwrap().is_empty());
}

#[test]
fn update_overwrites_all_fields_and_keeps_id() {
    let (_dir, store) = new_store();
    let id = store.add(&vase()).unwrap();
    let replacement = ArtifactFields {
        name: Some("Vase (restored)".to_string()),
        collection: None,
        category: Some("Ceramic".to_string()),
        location: Some("Storage".to_string()),
    };

    store.update(id, &replacement).unwrap();

    let loaded = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.fields, replacement);
}

#[test]
fn update_missing_id_leaves_store_unchanged() {
    let (_dir, store) = new_store();
    let id = store.add(&vase()).unwrap();
    let before = store.find_by_keyword("").unwrap();

    store.update(id + 100, &coin()).unwrap();

    assert_eq!(store.find_by_keyword("").unwrap(), before);
}

#[test]
fn delete_removes_record() {
    let (_dir, store) = new_store();
    let id = store.add(&vase()).unwrap();
    let kept = store.add(&coin()).unwrap();

    store.delete(id).unwrap();

    assert!(store.get_by_id(id).unwrap().is_none());
    assert_eq!(ids(&store.find_by_keyword("").unwrap()), vec![kept]);
}

#[test]
fn delete_missing_id_is_noop() {
    let (_dir, store) = new_store();
    let id = store.add(&vase()).unwrap();

    store.delete(id + 1).unwrap();
    store.delete(id).unwrap();
    store.delete(id).unwrap();

    assert!(store.find_by_keyword("").unwrap().is_empty());
}

#[test]
fn record_count_tracks_adds_minus_deletes() {
    let (_dir, store) = new_store();
    let mut live = Vec::new();
    for _ in 0..4 {
        live.push(store.add(&vase()).unwrap());
    }
    store.delete(live.remove(1)).unwrap();
    store.delete(9_999).unwrap();

    assert_eq!(store.find_by_keyword("").unwrap().len(), 3);
}
