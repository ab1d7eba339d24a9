use anyhow::Context;
use std::collections::BTreeMap;

use super::frontmatter::{Frontmatter, Heading};
use crate::content::{
    split_definition, BlockStyle, ContentStore, Enrichment, LockedQuestion, SectionId,
};
use crate::glossary::rich::parse_rich;
use crate::glossary::{Annotator, Segment};

pub const DEEP_DIVE_TITLE: &str = "أسئلة التفكير العميق";
pub const LOCKED_ANSWER_NOTICE: &str = "الإجابة النموذجية مغلقة (للأستاذ)";

/// Whether the model answers of the teacher panel are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Answers {
    #[default]
    Shown,
    /// the panel is locked, only the questions appear
    Hidden,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub id: SectionId,
    pub order: usize,
    /// markdown with YAML frontmatter
    pub content: String,
}

impl RenderedPage {
    pub fn slug(&self) -> &'static str {
        self.id.slug()
    }
}

/// Renders every section in navigation order.
pub fn render_deck(store: &ContentStore, annotator: &Annotator<'_>) -> anyhow::Result<Vec<RenderedPage>> {
    store
        .nav_items()
        .iter()
        .map(|item| render_section(store, annotator, item.id))
        .collect()
}

pub fn render_section(
    store: &ContentStore,
    annotator: &Annotator<'_>,
    id: SectionId,
) -> anyhow::Result<RenderedPage> {
    render_section_with(store, annotator, id, Answers::Shown)
}

pub fn render_section_with(
    store: &ContentStore,
    annotator: &Annotator<'_>,
    id: SectionId,
    answers: Answers,
) -> anyhow::Result<RenderedPage> {
    let nav = store.nav_items();
    let order = nav
        .iter()
        .position(|item| item.id == id)
        .context(format!("section '{}' is not in the navigation", id.slug()))?;
    let item = &nav[order];
    let next_slug = nav.get(order + 1).map(|n| n.id.slug());

    let mut page = PageWriter::new(annotator, answers);
    match id {
        SectionId::Intro => intro(&mut page, store),
        SectionId::Components => components(&mut page, store),
        SectionId::History => history(&mut page, store),
        SectionId::Subjects => subjects(&mut page, store),
        SectionId::Modern => modern(&mut page, store),
        SectionId::Review => review(&mut page, store),
        SectionId::Summary => summary(&mut page, store),
        SectionId::ExitTicket => exit_ticket(&mut page, store),
    }

    let mut fm: BTreeMap<&str, Frontmatter> = BTreeMap::new();
    fm.insert("title", Frontmatter::Title(item.label.as_str()));
    fm.insert("slug", Frontmatter::Slug(id.slug()));
    fm.insert("next_slug", Frontmatter::NextSlug(next_slug));
    fm.insert("order", Frontmatter::Order(order));
    fm.insert("duration", Frontmatter::Duration(item.duration.as_deref()));
    fm.insert("headings", Frontmatter::Headings(&page.headings));
    fm.insert("terms", Frontmatter::Terms(&page.terms));

    let content = format!(
        r#"---
{}---

{}"#,
        serde_yaml_ng::to_string(&fm)
            .context(format!("failed to serialize frontmatter for '{}'", id.slug()))?,
        page.body
    );

    Ok(RenderedPage { id, order, content })
}

/// Markdown body under construction.
struct PageWriter<'a, 'd> {
    annotator: &'a Annotator<'d>,
    answers: Answers,
    slugger: github_slugger::Slugger,
    body: String,
    headings: Vec<Heading>,
    /// glossary terms referenced on the page, first use first
    terms: Vec<String>,
}

impl<'a, 'd> PageWriter<'a, 'd> {
    fn new(annotator: &'a Annotator<'d>, answers: Answers) -> Self {
        Self {
            annotator,
            answers,
            slugger: github_slugger::Slugger::default(),
            body: String::with_capacity(4096),
            headings: Vec::new(),
            terms: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) {
        self.body.push_str(text);
    }

    fn heading(&mut self, level: usize, title: &str) {
        let slug = self.slugger.slug(title);
        self.body.push_str(&format!(
            "{} {} {{#{}}}\n\n",
            "#".repeat(level),
            escape(title),
            slug
        ));
        if level <= 3 {
            self.headings.push(Heading {
                level,
                slug,
                title: title.to_string(),
            });
        }
    }

    /// Annotated text on one line; newlines become `<br>`.
    fn inline(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 32);
        for segment in self.annotator.segments(text.trim_end()) {
            match segment {
                Segment::PlainText(plain) => out.push_str(&escape(plain).replace('\n', "<br>")),
                Segment::TermReference(term) => {
                    if !self.terms.iter().any(|t| t == term) {
                        self.terms.push(term.to_string());
                    }
                    let term = escape(term);
                    out.push_str(&format!(r#"<term data-term="{term}">{term}</term>"#));
                }
            }
        }
        out
    }

    fn paragraph(&mut self, text: &str) {
        let line = self.inline(text);
        self.push(&line);
        self.push("\n\n");
    }

    fn labelled(&mut self, label: &str, text: &str) {
        let line = self.inline(text);
        self.push(&format!("**{}:** {}\n\n", label, line));
    }

    fn bullets<S: AsRef<str>>(&mut self, items: &[S]) {
        for item in items {
            let line = self.inline(item.as_ref());
            self.push(&format!("- {}\n", line));
        }
        self.push("\n");
    }

    fn numbered<S: AsRef<str>>(&mut self, items: &[S]) {
        for (i, item) in items.iter().enumerate() {
            let line = self.inline(item.as_ref());
            self.push(&format!("{}. {}\n", i + 1, line));
        }
        self.push("\n");
    }

    /// `* ` list lines and `**bold**` spans, each span annotated.
    fn rich(&mut self, text: &str) {
        for line in parse_rich(text.trim_end()) {
            let mut rendered = String::new();
            for span in &line.spans {
                let inner = self.inline(span.text);
                if span.bold {
                    rendered.push_str(&format!("<strong>{}</strong>", inner));
                } else {
                    rendered.push_str(&inner);
                }
            }
            if line.is_list_item {
                self.push(&format!("- {}\n", rendered));
            } else if !rendered.is_empty() {
                self.push(&format!("{}\n\n", rendered));
            }
        }
        self.push("\n");
    }

    fn details(&mut self, summary: &str, inner: &str) {
        self.push(&format!(
            "<details>\n<summary>{}</summary>\n\n{}\n\n</details>\n\n",
            escape(summary),
            inner
        ));
    }

    fn table_row(&mut self, cells: &[String]) {
        let cells: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
        self.push(&format!("| {} |\n", cells.join(" | ")));
    }

    fn enrichment(&mut self, enrichment: &Enrichment) {
        let content = self.inline(&enrichment.content);
        self.push("> **مقتطف من المرجع (لإثراء المعرفة)**\n>\n");
        self.push(&format!("> \"{}\"\n", content));
        if let Some(source) = &enrichment.source_page {
            self.push(&format!(">\n> المصدر: {}\n", escape(source)));
        }
        self.push("\n");
    }

    fn deep_dive(&mut self, title: &str, questions: &[LockedQuestion]) {
        if questions.is_empty() {
            return;
        }
        self.heading(2, title);
        for q in questions {
            let question = self.inline(&q.question);
            self.push(&format!("**[{}]** {}\n\n", q.kind.badge(), question));
            match self.answers {
                Answers::Shown => {
                    let answer = self.inline(&q.model_answer);
                    self.details("كشف الإجابة النموذجية", &answer);
                }
                Answers::Hidden => self.push(&format!("*{}*\n\n", LOCKED_ANSWER_NOTICE)),
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn intro(page: &mut PageWriter<'_, '_>, store: &ContentStore) {
    let lecture = store.lecture();
    let intro = store.intro();

    for line in &lecture.institution {
        page.push(&format!("**{}**\n\n", escape(line)));
    }
    page.push(&format!("**إعداد:** {}\n\n", escape(&lecture.author)));

    page.heading(2, "الأهداف التعليمية المحورية");
    page.bullets(&lecture.learning_objectives);

    page.heading(2, "التهيئة الذهنية");
    page.paragraph(&intro.warm_up_prompt);

    page.heading(2, &intro.story.title);
    page.paragraph(&intro.story.scenario);
    page.push("**تساؤلات للنقاش:**\n\n");
    page.bullets(&intro.story.questions);
    let answer = page.inline(&intro.story.answer);
    page.details("تحليل اللغز (الربط بالواقع)", &answer);

    page.enrichment(&intro.enrichment);

    page.heading(2, "مقارنة جوهرية: مجتمع الدولة vs المجتمع الدولي");
    page.table_row(&[
        "المعيار".to_string(),
        "المجتمع الداخلي (الوطني)".to_string(),
        "المجتمع الدولي (اضغط للكشف)".to_string(),
    ]);
    page.push("| --- | --- | --- |\n");
    for row in &intro.comparison {
        let criteria = escape(&row.criteria);
        let national = page.inline(&row.national);
        let international = page.inline(&row.international);
        page.table_row(&[
            criteria,
            national,
            format!("<details><summary>اضغط للكشف</summary>{}</details>", international),
        ]);
    }
    page.push("\n");

    page.deep_dive(DEEP_DIVE_TITLE, &intro.deep_dive);
}

fn components(page: &mut PageWriter<'_, '_>, store: &ContentStore) {
    let components = store.components();
    page.paragraph(&components.lead);

    for (idx, card) in components.cards.iter().enumerate() {
        page.heading(3, &format!("{:02}. {}", idx + 1, card.title));
        page.paragraph(&card.description);
        let examples = card
            .examples
            .iter()
            .map(|e| escape(e))
            .collect::<Vec<String>>()
            .join("، ");
        page.push(&format!("**أمثلة تطبيقية:** {}\n\n", examples));
        page.labelled("مثال واقعي", &card.real_world);
    }

    page.enrichment(&components.enrichment);
    page.deep_dive(DEEP_DIVE_TITLE, &components.deep_dive);
}

fn history(page: &mut PageWriter<'_, '_>, store: &ContentStore) {
    for event in &store.history().events {
        page.heading(2, &event.treaty_name);
        page.push(&format!(
            "*{} ({})*\n\n",
            escape(&event.civilization),
            escape(&event.period)
        ));

        page.labelled("الأطراف", &event.details.parties);
        page.labelled("الموضوع", &event.details.topic);
        page.labelled("الحل", &event.details.solution);
        for paragraph in event.details.extra_paragraphs() {
            page.paragraph(paragraph);
        }

        page.heading(3, &format!("الإنجازات: {}", event.treaty_name));
        page.bullets(&event.achievements);
        page.labelled("الأثر المعاصر", &event.modern_impact);

        if let Some(enrichment) = &event.enrichment {
            let text = page.inline(enrichment);
            page.push(&format!("> {}\n\n", text));
        }

        let quiz = &event.quiz;
        page.heading(3, &format!("اختبر فهمك: {}", event.treaty_name));
        page.paragraph(&quiz.question);
        page.numbered(&quiz.options);
        let answer = format!(
            "**{}** {}",
            escape(&quiz.options[quiz.correct_index]),
            page.inline(&quiz.explanation)
        );
        page.details("الإجابة", &answer);

        page.deep_dive(
            &format!("للنقاش: {}", event.treaty_name),
            &event.discussion_questions,
        );
    }
}

fn subjects(page: &mut PageWriter<'_, '_>, store: &ContentStore) {
    let subjects = store.subjects();
    for subject in &subjects.subjects {
        page.heading(3, &subject.title);
        page.paragraph(&subject.description);
        let elements = subject
            .elements
            .iter()
            .map(|e| format!("`{}`", e))
            .collect::<Vec<String>>()
            .join(" ");
        page.push(&format!("{}\n\n", elements));
    }

    page.enrichment(&subjects.enrichment);

    page.heading(2, "لعبة التصنيف: دولة أم منظمة أم وضع خاص؟");
    for (idx, item) in subjects.game.iter().enumerate() {
        page.push(&format!("{}. {}\n", idx + 1, escape(&item.name)));
    }
    page.push("\n");
    let answers = subjects
        .game
        .iter()
        .map(|item| format!("- **{}**: {}", escape(&item.name), item.kind.label()))
        .collect::<Vec<String>>()
        .join("\n");
    page.details("الإجابات", &answers);

    page.deep_dive(DEEP_DIVE_TITLE, &subjects.deep_dive);
}

fn modern(page: &mut PageWriter<'_, '_>, store: &ContentStore) {
    let modern = store.modern();
    page.table_row(&["الماضي".to_string(), "الحاضر".to_string(), "الفترة".to_string()]);
    page.push("| --- | --- | --- |\n");
    for example in &modern.examples {
        let old = page.inline(&example.old);
        let new = page.inline(&example.new);
        page.table_row(&[old, new, escape(&example.period)]);
    }
    page.push("\n");

    page.enrichment(&modern.enrichment);
    page.deep_dive(DEEP_DIVE_TITLE, &modern.deep_dive);
}

fn review(page: &mut PageWriter<'_, '_>, store: &ContentStore) {
    let review = store.review();

    page.heading(2, "صواب أم خطأ؟");
    for (idx, item) in review.true_false.iter().enumerate() {
        let statement = page.inline(&item.statement);
        page.push(&format!("{}. {}\n\n", idx + 1, statement));
        let verdict = if item.is_true { "صواب" } else { "خطأ" };
        let correction = page.inline(&item.correction);
        page.details("الحكم", &format!("**{}**: {}", verdict, correction));
    }

    page.heading(2, "محاور النقاش");
    for topic in &review.topics {
        page.heading(3, &topic.title);
        page.bullets(&topic.points);
        if let Some(notes) = &topic.teacher_notes {
            let mut inner = PageWriter::new(page.annotator, page.answers);
            inner.rich(notes);
            for term in inner.terms {
                if !page.terms.contains(&term) {
                    page.terms.push(term);
                }
            }
            page.details("ملاحظات الأستاذ", inner.body.trim_end());
        }
    }
}

fn summary(page: &mut PageWriter<'_, '_>, store: &ContentStore) {
    for card in &store.summary().cards {
        page.heading(2, &card.title);
        for block in &card.blocks {
            page.heading(3, &block.heading);
            match block.style {
                BlockStyle::Definitions => {
                    for item in &block.items {
                        let (title, desc) = split_definition(item);
                        let title = page.inline(title);
                        match desc {
                            Some(desc) => {
                                let desc = page.inline(desc);
                                page.push(&format!("- **{}**: {}\n", title, desc));
                            }
                            None => page.push(&format!("- **{}**\n", title)),
                        }
                    }
                    page.push("\n");
                }
                BlockStyle::Bullets => {
                    let text = block
                        .items
                        .iter()
                        .map(|item| format!("* {}", item))
                        .collect::<Vec<String>>()
                        .join("\n");
                    page.rich(&text);
                }
                BlockStyle::Numbered => page.numbered(&block.items),
            }
        }
    }
}

fn exit_ticket(page: &mut PageWriter<'_, '_>, store: &ContentStore) {
    let ticket = store.exit_ticket();
    page.paragraph(&ticket.prompt);
    page.numbered(&ticket.questions);
    page.push(&format!(
        "[فتح نموذج بطاقة الخروج]({})\n",
        store.lecture().form_url
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary::GlossaryDictionary;
    use serde_yaml_ng::Value;

    fn frontmatter(page: &RenderedPage) -> Value {
        let rest = page.content.strip_prefix("---\n").unwrap();
        let end = rest.find("---\n").unwrap();
        serde_yaml_ng::from_str(&rest[..end]).unwrap()
    }

    fn terms(page: &RenderedPage) -> Vec<String> {
        frontmatter(page)["terms"]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|t| t.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn every_builtin_section_renders() {
        let store = ContentStore::builtin();
        let annotator = Annotator::new(store.glossary());
        let pages = render_deck(store, &annotator).unwrap();
        assert_eq!(pages.len(), SectionId::ALL.len());
        for (idx, page) in pages.iter().enumerate() {
            assert_eq!(page.order, idx);
            let fm = frontmatter(page);
            assert_eq!(fm["slug"].as_str(), Some(page.slug()));
            assert_eq!(fm["order"].as_u64(), Some(idx as u64));
        }
    }

    #[test]
    fn terms_render_as_markers_and_are_listed() {
        let store = ContentStore::builtin();
        let annotator = Annotator::new(store.glossary());
        let page = render_section(store, &annotator, SectionId::History).unwrap();
        assert!(page
            .content
            .contains(r#"<term data-term="معاهدة قادش">معاهدة قادش</term>"#));
        assert!(terms(&page).contains(&"معاهدة قادش".to_string()));
    }

    #[test]
    fn empty_glossary_renders_plain_text() {
        let store = ContentStore::builtin();
        let empty = GlossaryDictionary::new();
        let annotator = Annotator::new(&empty);
        let page = render_section(store, &annotator, SectionId::Intro).unwrap();
        assert!(!page.content.contains("<term"));
        assert!(terms(&page).is_empty());
    }

    #[test]
    fn exit_ticket_never_exposes_responses() {
        let store = ContentStore::builtin();
        let annotator = Annotator::new(store.glossary());
        let page = render_section(store, &annotator, SectionId::ExitTicket).unwrap();
        assert!(page.content.contains(&store.lecture().form_url));
        assert!(!page.content.contains(&store.lecture().responses_url));
        assert!(frontmatter(&page)["next_slug"].is_null());
    }

    #[test]
    fn headings_get_slug_ids() {
        let store = ContentStore::builtin();
        let annotator = Annotator::new(store.glossary());
        let page = render_section(store, &annotator, SectionId::Review).unwrap();
        assert!(page.content.contains("## صواب أم خطأ؟ {#"));
        let headings = frontmatter(&page)["headings"].as_sequence().unwrap().clone();
        assert_eq!(headings[0]["level"].as_u64(), Some(2));
        assert_eq!(headings[0]["title"].as_str(), Some("صواب أم خطأ؟"));
    }

    #[test]
    fn markup_in_text_is_escaped() {
        let dict: GlossaryDictionary = [("a<b", "x")].into_iter().collect();
        let annotator = Annotator::new(&dict);
        let mut page = PageWriter::new(&annotator, Answers::Shown);
        let out = page.inline("<i> a<b\nnext");
        assert_eq!(
            out,
            r#"&lt;i&gt; <term data-term="a&lt;b">a&lt;b</term><br>next"#
        );
    }

    #[test]
    fn locked_panel_hides_model_answers() {
        let store = ContentStore::builtin();
        let annotator = Annotator::new(store.glossary());
        let empty = GlossaryDictionary::new();
        let plain = Annotator::new(&empty);

        for id in [SectionId::Intro, SectionId::History, SectionId::Modern] {
            let shown = render_section(store, &plain, id).unwrap();
            let hidden = render_section_with(store, &annotator, id, Answers::Hidden).unwrap();
            let plain_hidden = render_section_with(store, &plain, id, Answers::Hidden).unwrap();

            assert!(hidden.content.contains(LOCKED_ANSWER_NOTICE));
            assert!(!hidden.content.contains("كشف الإجابة النموذجية"));
            for q in store.deep_dive(id) {
                let answer = escape(q.model_answer.trim_end()).replace('\n', "<br>");
                assert!(shown.content.contains(&answer));
                assert!(!plain_hidden.content.contains(&answer));
            }
        }
    }
}
