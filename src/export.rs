//! Writes a rendered lecture to disk: one Markdown page per section,
//! `lecture.yaml` metadata and the `glossary.yaml` definition index.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use crate::content::ContentStore;
use crate::deck::{render_deck, RenderedPage};
use crate::glossary::Annotator;

#[derive(Debug)]
pub struct ExportSummary {
    pub pages: usize,
    pub terms: usize,
    /// serialized lecture metadata
    pub metadata: String,
}

/// Replaces `output_dir` with a fresh export of the lecture.
pub fn export_lecture(store: &ContentStore, output_dir: &str) -> anyhow::Result<ExportSummary> {
    let annotator = Annotator::new(store.glossary());
    let pages = render_deck(store, &annotator).context("failed to render lecture")?;

    create_output_dir(output_dir).context("failed to create output directory")?;

    let metadata = create_lecture_metadata(store, output_dir)
        .context("failed to create lecture metadata")?;
    create_glossary(store, output_dir).context("failed to write glossary")?;

    for page in &pages {
        create_page(page, output_dir).context(format!("error writing page {}", page.slug()))?;
    }
    tracing::info!(pages = pages.len(), output_dir, "lecture exported");

    Ok(ExportSummary {
        pages: pages.len(),
        terms: store.glossary().len(),
        metadata,
    })
}

fn create_lecture_metadata(store: &ContentStore, output_dir: &str) -> anyhow::Result<String> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/lecture.yaml", output_dir))
        .context("failed to open file for lecture.yaml")?;

    let lecture = store.lecture();
    let mut map = BTreeMap::<&str, LectureFrontmatter>::new();
    map.insert("title", LectureFrontmatter::Text(lecture.title.as_str()));
    map.insert("subtitle", LectureFrontmatter::Text(lecture.subtitle.as_str()));
    map.insert("author", LectureFrontmatter::Text(lecture.author.as_str()));
    map.insert("version", LectureFrontmatter::Text(lecture.version.as_str()));
    map.insert("duration_minutes", LectureFrontmatter::Minutes(lecture.duration_minutes));
    map.insert("handout_url", LectureFrontmatter::Text(lecture.handout_url.as_str()));
    map.insert(
        "sections",
        LectureFrontmatter::Sections(
            store
                .nav_items()
                .iter()
                .map(|item| item.id.slug())
                .collect(),
        ),
    );

    let content = serde_yaml_ng::to_string(&map).context("failed to serialize lecture metadata")?;
    write!(file, "{}", content).context("failed to write lecture metadata")?;

    Ok(content)
}

fn create_glossary(store: &ContentStore, output_dir: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/glossary.yaml", output_dir))
        .context("failed to open file for glossary.yaml")?;

    let content = serde_yaml_ng::to_string(store.glossary().entries())
        .context("failed to serialize glossary")?;
    write!(file, "{}", content).context("failed to write glossary")?;

    Ok(())
}

fn create_page(page: &RenderedPage, output_dir: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/{}.md", output_dir, page.slug()))
        .context(format!("failed to open file for {}", page.slug()))?;

    write!(file, "{}", page.content).context("failed to write page")?;

    Ok(())
}

fn create_output_dir(output_dir: &str) -> anyhow::Result<()> {
    if fs::metadata(output_dir).is_ok() {
        fs::remove_dir_all(output_dir)?;
    }

    fs::create_dir_all(output_dir)?;
    Ok(())
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum LectureFrontmatter<'a> {
    Text(&'a str),
    Minutes(u32),
    Sections(Vec<&'a str>),
}
