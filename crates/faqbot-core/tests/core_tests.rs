use std::fs;

use tempfile::TempDir;

use faqbot_core::config::CorpusSettings;
use faqbot_core::corpus;
use faqbot_core::error::Error;
use faqbot_core::normalize::normalize;

#[test]
fn load_corpus_from_json_file_preserves_order() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("faqs.json");
    fs::write(
        &path,
        r#"[
            {"question": "What are the library hours?", "answer": "8:30 AM to 6:00 PM"},
            {"question": "Does the campus have WiFi?", "answer": "Yes."}
        ]"#,
    )
    .unwrap();

    let settings = CorpusSettings { path: Some(path.to_string_lossy().to_string()) };
    let pairs = corpus::load(&settings).expect("load corpus");

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].question, "What are the library hours?");
    assert_eq!(pairs[1].answer, "Yes.");
}

#[test]
fn missing_corpus_file_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = corpus::load_file(&tmp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}

#[test]
fn malformed_or_blank_entries_are_configuration_errors() {
    let tmp = TempDir::new().unwrap();
    let broken = tmp.path().join("broken.json");
    fs::write(&broken, r#"{"question": "not an array"}"#).unwrap();
    assert!(corpus::load_file(&broken).unwrap_err().is_configuration());

    let blank = tmp.path().join("blank.json");
    fs::write(&blank, r#"[{"question": "  ", "answer": "orphan"}]"#).unwrap();
    assert!(corpus::load_file(&blank).unwrap_err().is_configuration());
}

#[test]
fn every_builtin_question_normalizes_to_non_empty_text() {
    for pair in corpus::builtin_faqs() {
        let n = normalize(&pair.question);
        assert!(!n.is_empty(), "{:?} normalized to nothing", pair.question);
        assert_eq!(normalize(&n), n);
    }
}
