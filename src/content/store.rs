use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use super::error::ContentError;
use super::records::*;
use crate::glossary::GlossaryDictionary;

const BUILTIN_LECTURE: &str = include_str!("../../content/lecture.yaml");

/// Read-only lecture content. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct ContentStore {
    doc: LectureDocument,
}

impl ContentStore {
    /// The lecture bundled with the binary.
    pub fn builtin() -> &'static ContentStore {
        static STORE: OnceLock<ContentStore> = OnceLock::new();
        STORE.get_or_init(|| {
            // checked by `builtin_lecture_is_valid`
            ContentStore::from_yaml(BUILTIN_LECTURE).expect("bundled lecture must be valid")
        })
    }

    pub fn from_yaml(source: &str) -> Result<ContentStore, ContentError> {
        let doc: LectureDocument = serde_yaml_ng::from_str(source)?;
        let store = ContentStore { doc };
        store.validate()?;
        Ok(store)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<ContentStore, ContentError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "loaded lecture file");
        ContentStore::from_yaml(&source)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for item in &self.doc.nav {
            if !seen.insert(item.id) {
                return Err(ContentError::Invalid(format!(
                    "section '{}' appears twice in nav",
                    item.id.slug()
                )));
            }
        }
        if let Some(missing) = SectionId::ALL.iter().find(|id| !seen.contains(id)) {
            return Err(ContentError::Invalid(format!(
                "section '{}' is missing from nav",
                missing.slug()
            )));
        }

        for event in &self.doc.history.events {
            let quiz = &event.quiz;
            if quiz.correct_index >= quiz.options.len() {
                return Err(ContentError::Invalid(format!(
                    "quiz for '{}' has correct_index {} but only {} options",
                    event.treaty_name,
                    quiz.correct_index,
                    quiz.options.len()
                )));
            }
        }

        if self.doc.lecture.duration_minutes == 0 {
            return Err(ContentError::Invalid(
                "lecture duration_minutes must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn document(&self) -> &LectureDocument {
        &self.doc
    }

    pub fn lecture(&self) -> &LectureMeta {
        &self.doc.lecture
    }

    pub fn glossary(&self) -> &GlossaryDictionary {
        &self.doc.glossary
    }

    /// sections in navigation order
    pub fn nav_items(&self) -> &[NavItem] {
        &self.doc.nav
    }

    pub fn nav_item(&self, id: SectionId) -> Option<&NavItem> {
        self.doc.nav.iter().find(|item| item.id == id)
    }

    pub fn intro(&self) -> &IntroContent {
        &self.doc.intro
    }

    pub fn components(&self) -> &ComponentsContent {
        &self.doc.components
    }

    pub fn history(&self) -> &HistoryContent {
        &self.doc.history
    }

    pub fn subjects(&self) -> &SubjectsContent {
        &self.doc.subjects
    }

    pub fn modern(&self) -> &ModernContent {
        &self.doc.modern
    }

    pub fn review(&self) -> &ReviewContent {
        &self.doc.review
    }

    pub fn summary(&self) -> &SummaryContent {
        &self.doc.summary
    }

    pub fn exit_ticket(&self) -> &ExitTicketContent {
        &self.doc.exit_ticket
    }

    /// Teacher-panel questions for a section; empty where the section has none.
    pub fn deep_dive(&self, id: SectionId) -> &[LockedQuestion] {
        match id {
            SectionId::Intro => &self.doc.intro.deep_dive,
            SectionId::Components => &self.doc.components.deep_dive,
            SectionId::Subjects => &self.doc.subjects.deep_dive,
            SectionId::Modern => &self.doc.modern.deep_dive,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lecture_is_valid() {
        let store = ContentStore::from_yaml(BUILTIN_LECTURE).unwrap();
        assert_eq!(store.nav_items().len(), SectionId::ALL.len());
        assert!(!store.glossary().is_empty());
        assert!(!store.history().events.is_empty());
        assert!(!store.subjects().game.is_empty());
    }

    #[test]
    fn builtin_is_cached() {
        assert!(std::ptr::eq(ContentStore::builtin(), ContentStore::builtin()));
    }

    #[test]
    fn rejects_out_of_range_quiz_answer() {
        let mut doc: LectureDocument = serde_yaml_ng::from_str(BUILTIN_LECTURE).unwrap();
        doc.history.events[0].quiz.correct_index = 99;
        let store = ContentStore { doc };
        let err = store.validate().unwrap_err();
        assert!(matches!(err, ContentError::Invalid(msg) if msg.contains("correct_index 99")));
    }

    #[test]
    fn rejects_missing_section() {
        let mut doc: LectureDocument = serde_yaml_ng::from_str(BUILTIN_LECTURE).unwrap();
        doc.nav.retain(|item| item.id != SectionId::Review);
        let store = ContentStore { doc };
        assert!(matches!(store.validate(), Err(ContentError::Invalid(msg)) if msg.contains("review")));
    }

    #[test]
    fn rejects_duplicate_section() {
        let mut doc: LectureDocument = serde_yaml_ng::from_str(BUILTIN_LECTURE).unwrap();
        let first = doc.nav[0].clone();
        doc.nav.push(first);
        let store = ContentStore { doc };
        assert!(matches!(store.validate(), Err(ContentError::Invalid(msg)) if msg.contains("twice")));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            ContentStore::from_yaml("lecture: [unclosed"),
            Err(ContentError::Yaml(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ContentStore::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn deep_dive_is_empty_for_sections_without_panel() {
        let store = ContentStore::builtin();
        assert!(!store.deep_dive(SectionId::Intro).is_empty());
        assert!(store.deep_dive(SectionId::ExitTicket).is_empty());
    }
}
