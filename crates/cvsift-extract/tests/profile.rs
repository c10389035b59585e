use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use cvsift_acquire::Acquirer;
use cvsift_core::{CandidateProfile, EngineConfig, Lexicon};
use cvsift_extract::Engine;
use cvsift_infer::{Entity, EntityLabel, EntityRecognizer, RuleRecognizer, SubwordEmbedder};

const JANE_SMITH: &str = "Jane Smith\njane.smith@acme.com\n+1 555 0100\nBerlin, Germany\n\
                          Skills: Python, Docker\nSenior Software Engineer at Acme Corp";

fn offline_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.ocr.tesseract_cmd = "/nonexistent/tesseract".into();
    config.pdftoppm_cmd = "/nonexistent/pdftoppm".into();
    config.antiword_cmd = "/nonexistent/antiword".into();
    config.embedding_model_dir = None;
    config.ner_model_dir = None;
    config.lexicon_path = None;
    config
}

fn engine() -> Engine {
    Engine::new(&offline_config()).unwrap()
}

fn assert_jane_smith(profile: &CandidateProfile) {
    assert_eq!(profile.name, "Jane Smith");
    assert_eq!(profile.email.as_deref(), Some("jane.smith@acme.com"));
    assert!(profile.phone.as_deref().is_some_and(|p| p.contains("555")));
    assert!(profile.location.contains("Berlin") || profile.location.contains("Germany"));
    assert!(profile.skills.contains("python"));
    assert!(profile.skills.contains("docker"));
    assert!(profile.jobs.iter().any(|j| j.contains("software engineer")));
    assert!(profile.companies.iter().any(|c| c.to_lowercase().contains("acme")));
}

#[test]
fn test_jane_smith_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.txt");
    std::fs::write(&path, JANE_SMITH).unwrap();

    let profile = engine().extract_profile(&path);
    assert_jane_smith(&profile);
}

#[test]
fn test_jane_smith_docx() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.docx");
    let body: String = JANE_SMITH
        .lines()
        .map(|line| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", line))
        .collect();
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(format!("<w:document><w:body>{}</w:body></w:document>", body).as_bytes())
        .unwrap();
    zip.finish().unwrap();

    assert_jane_smith(&engine().extract_profile(&path));
}

#[test]
fn test_extraction_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.txt");
    std::fs::write(&path, JANE_SMITH).unwrap();

    let engine = engine();
    let first = engine.extract_profile(&path);
    let second = engine.extract_profile(&path);
    assert_jane_smith(&first);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_files_yield_empty_profile() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine();
    for ext in ["pdf", "docx", "doc", "txt", "jpg", "jpeg", "png", "bmp", "tiff", "tif"] {
        let path = dir.path().join(format!("empty.{ext}"));
        std::fs::write(&path, b"").unwrap();
        assert_eq!(engine.acquire_text(&path), "");
        assert!(engine.extract_profile(&path).is_empty(), "extension {ext}");
    }
}

#[test]
fn test_unsupported_and_corrupt_files_never_fail() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine();
    for (name, bytes) in [
        ("cv.odt", &b"Jane Smith"[..]),
        ("cv.docx", &b"PK\x03\x04 broken"[..]),
        ("cv.pdf", &b"%PDF-1.7 broken"[..]),
        ("cv.png", &b"\x89PNG broken"[..]),
    ] {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        assert!(engine.extract_profile(&path).is_empty(), "{name}");
    }
    assert!(engine.extract_profile(Path::new("/nonexistent/cv.txt")).is_empty());
}

/// Feeds fixed organizations regardless of input.
struct StubRecognizer(Vec<(EntityLabel, String)>);

impl EntityRecognizer for StubRecognizer {
    fn recognize(&self, _text: &str) -> Vec<Entity> {
        self.0
            .iter()
            .map(|(label, text)| Entity {
                label: *label,
                text: text.clone(),
                start: 0,
                end: text.len(),
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

#[test]
fn test_blacklisted_organizations_are_not_companies() {
    let config = offline_config();
    let lexicon = Lexicon::default();
    let recognizer = Arc::new(StubRecognizer(vec![
        (EntityLabel::Org, "Berlin University".into()),
        (EntityLabel::Org, "Initech".into()),
        (EntityLabel::Org, "Portfolio Website".into()),
        (EntityLabel::Gpe, "Berlin".into()),
    ]));
    let engine = Engine::with_components(
        Acquirer::new(&config),
        recognizer,
        Arc::new(SubwordEmbedder::default()),
        &lexicon,
        config.similarity_threshold,
    )
    .unwrap();

    let profile = engine.extract_profile_from_text("Studied at Berlin University, worked at Initech");
    assert_eq!(profile.companies, BTreeSet::from(["Initech".to_string()]));
    assert_eq!(profile.location, "Berlin");
    assert_eq!(profile.name, "Unknown");
}

#[test]
fn test_custom_lexicon_changes_vocabulary() {
    let dir = tempfile::tempdir().unwrap();
    let lexicon_path = dir.path().join("lexicon.json");
    std::fs::write(&lexicon_path, r#"{"skills": ["Rust", "Go"]}"#).unwrap();

    let mut config = offline_config();
    config.lexicon_path = Some(lexicon_path);
    let engine = Engine::new(&config).unwrap();

    let profile = engine.extract_profile_from_text("Jane Smith\nRust and Python developer");
    assert_eq!(profile.skills, BTreeSet::from(["rust".to_string()]));
}

#[test]
fn test_rule_recognizer_drives_name_and_location() {
    let lexicon = Lexicon::default();
    let rules = RuleRecognizer::new(&lexicon);
    let (name, location) =
        cvsift_extract::extract_name_and_location(&rules, "John Doe lives in Berlin");
    assert_eq!(name.as_deref(), Some("John Doe"));
    assert_eq!(location.as_deref(), Some("Berlin"));
}
