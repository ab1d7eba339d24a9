use std::fs;

use intl_society::content::{ContentStore, SectionId};
use intl_society::export::export_lecture;

#[test]
fn exports_every_section_with_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("lecture");
    let out = out.to_str().unwrap();

    let store = ContentStore::builtin();
    let summary = export_lecture(store, out).unwrap();

    assert_eq!(summary.pages, SectionId::ALL.len());
    assert_eq!(summary.terms, store.glossary().len());

    for id in SectionId::ALL {
        let page = fs::read_to_string(format!("{}/{}.md", out, id.slug())).unwrap();
        assert!(page.starts_with("---\n"), "{} has no frontmatter", id.slug());
    }

    let metadata: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(&fs::read_to_string(format!("{}/lecture.yaml", out)).unwrap()).unwrap();
    assert_eq!(metadata["duration_minutes"].as_u64(), Some(90));
    assert_eq!(metadata["sections"].as_sequence().map(Vec::len), Some(SectionId::ALL.len()));
    assert!(metadata.get("teacher_passcode").is_none());

    let glossary = fs::read_to_string(format!("{}/glossary.yaml", out)).unwrap();
    assert!(glossary.contains("السيادة"));
}

#[test]
fn responses_link_never_reaches_student_pages() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_str().unwrap().to_string();
    let store = ContentStore::builtin();
    export_lecture(store, &out).unwrap();

    let responses = &store.lecture().responses_url;
    assert!(!responses.is_empty());
    for entry in fs::read_dir(&out).unwrap() {
        let text = fs::read_to_string(entry.unwrap().path()).unwrap();
        assert!(!text.contains(responses.as_str()));
    }
}

#[test]
fn export_replaces_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_str().unwrap().to_string();
    fs::write(format!("{}/stale.md", out), "old").unwrap();

    export_lecture(ContentStore::builtin(), &out).unwrap();
    export_lecture(ContentStore::builtin(), &out).unwrap();

    assert!(!dir.path().join("stale.md").exists());
    assert!(dir.path().join("exit-ticket.md").exists());
}
