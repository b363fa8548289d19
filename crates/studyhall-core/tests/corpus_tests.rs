use std::fs;
use tempfile::TempDir;

use studyhall_core::corpus::{default_entries, load, seed, CorpusLoader};
use studyhall_core::error::Error;
use studyhall_core::types::CorpusEntry;

#[test]
fn load_seeds_missing_store_and_parent_dirs() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data/nested/qa_dataset.json");

    let corpus = load(&path).expect("load");

    assert!(path.exists(), "store is created on first load");
    assert_eq!(corpus.len(), 5);
    assert_eq!(corpus.entries(), default_entries().as_slice());
    let subjects: std::collections::HashSet<_> = corpus.iter().map(|e| e.subject()).collect();
    assert!(subjects.len() >= 4, "seed spans several subjects");
}

#[test]
fn second_load_is_a_pure_read() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("qa.json");
    let first = load(&path).unwrap();
    let written = fs::read_to_string(&path).unwrap();

    let second = load(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&path).unwrap(), written);
}

#[test]
fn records_are_trimmed_defaulted_and_filtered() {
    let content = r#"[
        {"question": "  What is an atom? ", "answer": " The smallest unit of an element. ", "subject": "  Chemistry "},
        {"question": "Who wrote Hamlet?", "answer": "Shakespeare."},
        {"question": "Blank subject", "answer": "Falls back.", "subject": "   "},
        {"question": "   ", "answer": "no question"},
        {"question": "no answer", "answer": ""},
        {"question": "null subject", "answer": "ok", "subject": null},
        {"question": 42, "answer": "wrong type"},
        "not an object",
        {"answer": "missing question"}
    ]"#;

    let corpus = CorpusLoader::new().parse(content).expect("parse");

    assert_eq!(corpus.len(), 4);
    let first = corpus.get(0).unwrap();
    assert_eq!(first.question(), "What is an atom?");
    assert_eq!(first.answer(), "The smallest unit of an element.");
    assert_eq!(first.subject(), "Chemistry");
    assert_eq!(corpus.get(1).unwrap().subject(), "General");
    assert_eq!(corpus.get(2).unwrap().subject(), "General");
    assert_eq!(corpus.get(3).unwrap().question(), "null subject");
    assert_eq!(corpus.get(3).unwrap().subject(), "General");
}

#[test]
fn filtering_is_reproducible() {
    let content = r#"[{"question": "a q", "answer": ""}, {"question": "b q", "answer": "b"}]"#;
    let loader = CorpusLoader::new();
    assert_eq!(loader.parse(content).unwrap(), loader.parse(content).unwrap());
}

#[test]
fn non_array_top_level_is_a_format_error() {
    let loader = CorpusLoader::new();
    for content in [r#"{"question": "q", "answer": "a"}"#, "42", "\"text\"", "null"] {
        let err = loader.parse(content).unwrap_err();
        assert!(matches!(err, Error::CorpusFormat(_)), "{content} -> {err:?}");
    }
}

#[test]
fn unparseable_store_is_a_format_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "[{\"question\": ").unwrap();

    let err = load(&path).unwrap_err();
    assert!(matches!(err, Error::CorpusFormat(_)));
}

#[test]
fn empty_array_loads_as_empty_corpus() {
    let corpus = CorpusLoader::new().parse("[]").unwrap();
    assert!(corpus.is_empty());
}

#[test]
fn seed_respects_existing_store_unless_forced() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("qa.json");
    fs::write(&path, "[]").unwrap();

    assert!(!seed(&path, false).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");

    assert!(seed(&path, true).unwrap());
    assert_eq!(load(&path).unwrap().len(), 5);
}

#[test]
fn default_seed_is_already_validated() {
    let entries = default_entries();
    assert_eq!(entries.len(), 5);
    for entry in &entries {
        let rebuilt = CorpusEntry::new(entry.question(), entry.answer(), entry.subject());
        assert_eq!(rebuilt.as_ref(), Some(entry));
    }
}

#[test]
fn entry_constructor_enforces_non_empty_trimmed_fields() {
    assert!(CorpusEntry::new("  ", "answer", "Physics").is_none());
    assert!(CorpusEntry::new("question", "\n", "Physics").is_none());
    let entry = CorpusEntry::new(" q ", " a ", " ").unwrap();
    assert_eq!((entry.question(), entry.answer(), entry.subject()), ("q", "a", "General"));
}
