use indexer::{build_index, input_files, load_documents};
use std::fs;
use tempfile::tempdir;

#[test]
fn jsonl_and_json_documents_get_dense_ids() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.jsonl"), "[10, 20]\n\n{\"id\": \"second\", \"fingerprints\": [20, 30, 30]}\n").unwrap();
    fs::write(dir.path().join("b.json"), "[[30], {\"fingerprints\": [40]}]").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let files = input_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);

    let docs = load_documents(dir.path()).unwrap();
    assert_eq!(docs.len(), 4);
    assert_eq!(docs[1].external_id(), Some("second"));
    assert_eq!(docs[0].external_id(), None);

    let idx = build_index(dir.path()).unwrap().index;
    assert_eq!(idx.find(20).into_parts(), (vec![0, 1], vec![1, 1]));
    assert_eq!(idx.find(30).into_parts(), (vec![1, 2], vec![1, 1]));
    assert_eq!(idx.find(40).documents, vec![3]);
    assert_eq!(idx.len(), 4);
}

#[test]
fn bare_number_array_is_a_single_document() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("one.json");
    fs::write(&file, "[7, 7, 7]").unwrap();

    let loaded = build_index(&file).unwrap();
    assert_eq!(loaded.index.len(), 1);
    let hit = loaded.lookup(7);
    assert_eq!(hit.postings.documents, vec![0]);
    assert_eq!(hit.collapsed.len(), 1);
    assert_eq!((hit.collapsed[0].doc, hit.collapsed[0].frequency), (0, 1));

    let json = serde_json::to_value(&loaded.lookup(99)).unwrap();
    assert_eq!(json["documents"].as_array().unwrap().len(), 0);
    assert_eq!(json["term"].as_u64(), Some(99));
}

#[test]
fn empty_array_takes_an_id_in_json_and_jsonl() {
    for first in ["a.json", "a.jsonl"] {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(first), "[]\n").unwrap();
        fs::write(dir.path().join("b.jsonl"), "[5]\n").unwrap();

        let loaded = build_index(dir.path()).unwrap();
        assert_eq!(loaded.external_ids.len(), 2, "{first}");
        assert_eq!(loaded.index.find(5).documents, vec![1], "{first}");
    }
}

#[test]
fn malformed_line_reports_location() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bad.jsonl");
    fs::write(&file, "[1]\n{\"nope\": true}\n").unwrap();

    let err = load_documents(&file).unwrap_err();
    assert!(format!("{err:#}").contains("bad.jsonl:2"));
}

#[test]
fn unreadable_line_reports_location() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("binary.jsonl");
    fs::write(&file, b"[1]\n[2]\n\xff\xfe\n".as_slice()).unwrap();

    let err = load_documents(&file).unwrap_err();
    assert!(format!("{err:#}").contains("binary.jsonl:3"));
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(build_index(&dir.path().join("absent")).is_err());
}

#[test]
fn find_output_names_external_ids() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("docs.jsonl");
    fs::write(&file, "{\"id\": \"alpha\", \"fingerprints\": [1, 2]}\n[2]\n{\"id\": \"gamma\", \"fingerprints\": [2]}\n").unwrap();

    let loaded = build_index(&file).unwrap();
    assert_eq!(loaded.external_id(0), Some("alpha"));
    assert_eq!(loaded.external_id(1), None);
    assert_eq!(loaded.external_id(9), None);

    let json = serde_json::to_value(&loaded.lookup(2)).unwrap();
    assert_eq!(json["documents"], serde_json::json!([0, 1, 2]));
    assert_eq!(json["frequencies"], serde_json::json!([1, 1, 1]));
    assert_eq!(
        json["collapsed"],
        serde_json::json!([
            { "doc": 0, "frequency": 1, "id": "alpha" },
            { "doc": 1, "frequency": 1, "id": null },
            { "doc": 2, "frequency": 1, "id": "gamma" },
        ])
    );
}

#[test]
fn stats_and_dump_output_shape() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("docs.jsonl");
    fs::write(&file, "{\"id\": \"first\", \"fingerprints\": [10, 20, 10]}\n[20]\n").unwrap();

    let loaded = build_index(&file).unwrap();
    let stats = serde_json::to_value(loaded.index.stats()).unwrap();
    assert_eq!(stats, serde_json::json!({ "terms": 2, "postings": 3, "documents": 2 }));

    let dump = serde_json::to_value(loaded.dump()).unwrap();
    assert_eq!(
        dump["documents"],
        serde_json::json!([{ "doc": 0, "id": "first" }, { "doc": 1, "id": null }])
    );
    assert_eq!(
        dump["entries"],
        serde_json::json!([
            { "term": 10, "document_listing": [0], "frequencies": { "0": 1 } },
            { "term": 20, "document_listing": [0, 1], "frequencies": { "0": 1, "1": 1 } },
        ])
    );
}
