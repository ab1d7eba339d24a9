use serde::{Deserialize, Serialize};

use crate::glossary::GlossaryDictionary;

/// Lecture sections, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Intro,
    Components,
    History,
    Subjects,
    Modern,
    Review,
    Summary,
    ExitTicket,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        SectionId::Intro,
        SectionId::Components,
        SectionId::History,
        SectionId::Subjects,
        SectionId::Modern,
        SectionId::Review,
        SectionId::Summary,
        SectionId::ExitTicket,
    ];

    /// file and url slug, stable across lecture files
    pub fn slug(self) -> &'static str {
        match self {
            SectionId::Intro => "intro",
            SectionId::Components => "components",
            SectionId::History => "history",
            SectionId::Subjects => "subjects",
            SectionId::Modern => "modern",
            SectionId::Review => "review",
            SectionId::Summary => "summary",
            SectionId::ExitTicket => "exit-ticket",
        }
    }

    pub fn from_slug(slug: &str) -> Option<SectionId> {
        SectionId::ALL.into_iter().find(|id| id.slug() == slug)
    }
}

/// Course metadata shown on the title slide and in the sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LectureMeta {
    pub title: String,
    pub subtitle: String,
    pub version: String,
    /// header lines, outermost institution first
    pub institution: Vec<String>,
    pub author: String,
    pub duration_minutes: u32,
    pub handout_url: String,
    pub form_url: String,
    pub responses_url: String,
    pub teacher_passcode: String,
    pub learning_objectives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub id: SectionId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub criteria: String,
    pub national: String,
    pub international: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Comprehension,
    Critical,
}

impl QuestionKind {
    pub fn badge(self) -> &'static str {
        match self {
            QuestionKind::Comprehension => "فهم",
            QuestionKind::Critical => "تحليل",
        }
    }
}

/// Deep-dive question whose model answer sits behind the teacher panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedQuestion {
    pub kind: QuestionKind,
    pub question: String,
    pub model_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrichment {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroStory {
    pub title: String,
    pub scenario: String,
    pub questions: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroContent {
    pub story: IntroStory,
    pub warm_up_prompt: String,
    pub comparison: Vec<ComparisonRow>,
    pub enrichment: Enrichment,
    pub deep_dive: Vec<LockedQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCard {
    pub title: String,
    pub description: String,
    pub examples: Vec<String>,
    pub real_world: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentsContent {
    pub lead: String,
    pub cards: Vec<ComponentCard>,
    pub enrichment: Enrichment,
    pub deep_dive: Vec<LockedQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatyDetails {
    pub parties: String,
    pub topic: String,
    pub solution: String,
    /// paragraphs separated by `|||`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<String>,
}

impl TreatyDetails {
    pub const SEPARATOR: &'static str = "|||";

    pub fn extra_paragraphs(&self) -> Vec<&str> {
        match self.extra_info.as_deref() {
            Some(text) => text
                .split(Self::SEPARATOR)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub civilization: String,
    pub period: String,
    pub treaty_name: String,
    pub details: TreatyDetails,
    pub achievements: Vec<String>,
    pub modern_impact: String,
    pub quiz: QuizQuestion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<String>,
    #[serde(default)]
    pub discussion_questions: Vec<LockedQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryContent {
    pub events: Vec<HistoryEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub title: String,
    pub description: String,
    pub elements: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameItemKind {
    State,
    Org,
    Special,
}

impl GameItemKind {
    pub const ALL: [GameItemKind; 3] = [GameItemKind::State, GameItemKind::Org, GameItemKind::Special];

    pub fn label(self) -> &'static str {
        match self {
            GameItemKind::State => "دولة (شخص أصلي)",
            GameItemKind::Org => "منظمة (شخص وظيفي)",
            GameItemKind::Special => "وضع خاص",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameItem {
    pub name: String,
    pub kind: GameItemKind,
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectsContent {
    pub subjects: Vec<Subject>,
    pub game: Vec<GameItem>,
    pub enrichment: Enrichment,
    pub deep_dive: Vec<LockedQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModernExample {
    pub old: String,
    pub new: String,
    pub period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModernContent {
    pub examples: Vec<ModernExample>,
    pub enrichment: Enrichment,
    pub deep_dive: Vec<LockedQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub statement: String,
    pub is_true: bool,
    pub correction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionTopic {
    pub title: String,
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewContent {
    pub true_false: Vec<ReviewItem>,
    pub topics: Vec<DiscussionTopic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStyle {
    /// items are `title:description`
    Definitions,
    Bullets,
    Numbered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryBlock {
    pub heading: String,
    pub style: BlockStyle,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryCard {
    pub title: String,
    pub blocks: Vec<SummaryBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryContent {
    pub cards: Vec<SummaryCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitTicketContent {
    pub prompt: String,
    pub questions: Vec<String>,
}

/// Whole lecture document as stored in `content/lecture.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LectureDocument {
    pub lecture: LectureMeta,
    pub nav: Vec<NavItem>,
    pub glossary: GlossaryDictionary,
    pub intro: IntroContent,
    pub components: ComponentsContent,
    pub history: HistoryContent,
    pub subjects: SubjectsContent,
    pub modern: ModernContent,
    pub review: ReviewContent,
    pub summary: SummaryContent,
    pub exit_ticket: ExitTicketContent,
}

/// Splits a `title:description` summary item on the first colon.
pub fn split_definition(item: &str) -> (&str, Option<&str>) {
    match item.split_once(':') {
        Some((title, desc)) => (title.trim(), Some(desc.trim())),
        None => (item.trim(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_slugs_round_trip() {
        for id in SectionId::ALL {
            assert_eq!(SectionId::from_slug(id.slug()), Some(id));
        }
        assert_eq!(SectionId::from_slug("nowhere"), None);
    }

    #[test]
    fn extra_info_splits_on_separator() {
        let details = TreatyDetails {
            parties: String::new(),
            topic: String::new(),
            solution: String::new(),
            extra_info: Some("الأول ||| الثاني|||  ".to_string()),
        };
        assert_eq!(details.extra_paragraphs(), vec!["الأول", "الثاني"]);
    }

    #[test]
    fn definition_item_splits_on_first_colon() {
        assert_eq!(
            split_definition("السيادة: سلطة عليا: لا تعلوها سلطة"),
            ("السيادة", Some("سلطة عليا: لا تعلوها سلطة"))
        );
        assert_eq!(split_definition("بدون وصف"), ("بدون وصف", None));
    }
}
