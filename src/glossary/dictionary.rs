use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

/// Term to definition map.
///
/// Lookup is by exact, case-sensitive key. Declaration order is kept
/// because the annotator builds its alternation in that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<GlossaryEntry>", into = "Vec<GlossaryEntry>")]
pub struct GlossaryDictionary {
    entries: Vec<GlossaryEntry>,
    index: HashMap<String, usize>,
}

impl GlossaryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term. Empty terms are dropped; a repeated term keeps its
    /// first position and takes the newer definition.
    fn insert(&mut self, term: String, definition: String) {
        if term.is_empty() {
            tracing::warn!(definition = %definition, "dropping glossary entry with an empty term");
            return;
        }

        match self.index.get(&term) {
            Some(&pos) => {
                tracing::warn!(term = %term, "duplicate glossary term, keeping the later definition");
                self.entries[pos].definition = definition;
            }
            None => {
                self.index.insert(term.clone(), self.entries.len());
                self.entries.push(GlossaryEntry { term, definition });
            }
        }
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.index
            .get(term)
            .map(|&pos| self.entries[pos].definition.as_str())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// terms in declaration order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.term.as_str())
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for GlossaryDictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = GlossaryDictionary::new();
        for (term, definition) in iter {
            dict.insert(term.into(), definition.into());
        }
        dict
    }
}

impl From<Vec<GlossaryEntry>> for GlossaryDictionary {
    fn from(entries: Vec<GlossaryEntry>) -> Self {
        entries
            .into_iter()
            .map(|e| (e.term, e.definition))
            .collect()
    }
}

impl From<GlossaryDictionary> for Vec<GlossaryEntry> {
    fn from(dict: GlossaryDictionary) -> Self {
        dict.entries
    }
}
