use regex::{Matches, Regex};
use serde::Serialize;
use serde_json::Value;

use super::GlossaryDictionary;

/// A contiguous piece of annotated text, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Segment<'t> {
    PlainText(&'t str),
    /// exact dictionary key
    TermReference(&'t str),
}

impl<'t> Segment<'t> {
    pub fn text(&self) -> &'t str {
        match *self {
            Segment::PlainText(s) | Segment::TermReference(s) => s,
        }
    }

    pub fn term(&self) -> Option<&'t str> {
        match *self {
            Segment::TermReference(t) => Some(t),
            Segment::PlainText(_) => None,
        }
    }
}

/// Rejoins segment text; always equals the annotated input.
pub fn concat(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// Splits prose into plain runs and glossary term references.
///
/// All terms are escaped and joined into one alternation, and the text is
/// split on it while keeping the matched terms. Matching is exact and
/// case-sensitive. When several terms could match at the same position the
/// regex engine's leftmost-first rule applies: the term declared first in
/// the dictionary wins, even if a later one is longer. So with "دولة"
/// declared before "دولة قومية", the text "دولة قومية" yields the shorter
/// term followed by plain text. Reorder the dictionary to change this.
#[derive(Debug, Clone)]
pub struct Annotator<'d> {
    dictionary: &'d GlossaryDictionary,
    pattern: Option<Regex>,
}

impl<'d> Annotator<'d> {
    pub fn new(dictionary: &'d GlossaryDictionary) -> Self {
        Self {
            dictionary,
            pattern: build_pattern(dictionary),
        }
    }

    /// Lazily yields the segments of `text`.
    pub fn segments<'a, 't>(&'a self, text: &'t str) -> Segments<'a, 't> {
        Segments {
            text,
            dictionary: self.dictionary,
            matches: self.pattern.as_ref().map(|p| p.find_iter(text)),
            cursor: 0,
            pending: None,
            emitted: false,
            done: false,
        }
    }

    pub fn annotate<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        self.segments(text).collect()
    }

    /// Annotates an untyped value. Anything that is not a string, including
    /// a missing value, yields no segments instead of an error.
    pub fn annotate_value<'t>(&self, value: Option<&'t Value>) -> Vec<Segment<'t>> {
        match value {
            Some(Value::String(text)) => self.annotate(text),
            other => {
                tracing::debug!(value = ?other, "skipping glossary annotation of non-string value");
                Vec::new()
            }
        }
    }

    pub fn definition(&self, term: &str) -> Option<&'d str> {
        self.dictionary.get(term)
    }
}

fn build_pattern(dictionary: &GlossaryDictionary) -> Option<Regex> {
    if dictionary.is_empty() {
        return None;
    }

    let alternation = dictionary
        .terms()
        .map(regex::escape)
        .collect::<Vec<String>>()
        .join("|");

    match Regex::new(&format!("(?:{})", alternation)) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!(error = %e, terms = dictionary.len(), "glossary pattern rejected, rendering plain text");
            None
        }
    }
}

/// Iterator returned by [`Annotator::segments`].
pub struct Segments<'a, 't> {
    text: &'t str,
    dictionary: &'a GlossaryDictionary,
    matches: Option<Matches<'a, 't>>,
    cursor: usize,
    pending: Option<Segment<'t>>,
    emitted: bool,
    done: bool,
}

impl<'a, 't> Iterator for Segments<'a, 't> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Segment<'t>> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }
        if self.done {
            return None;
        }

        match self.matches.as_mut().and_then(Iterator::next) {
            Some(m) => {
                let before = &self.text[self.cursor..m.start()];
                self.cursor = m.end();
                self.emitted = true;

                let piece = m.as_str();
                let segment = if self.dictionary.contains(piece) {
                    Segment::TermReference(piece)
                } else {
                    Segment::PlainText(piece)
                };

                if before.is_empty() {
                    Some(segment)
                } else {
                    self.pending = Some(segment);
                    Some(Segment::PlainText(before))
                }
            }
            None => {
                self.done = true;
                let rest = &self.text[self.cursor..];
                if rest.is_empty() && self.emitted {
                    None
                } else {
                    self.emitted = true;
                    Some(Segment::PlainText(rest))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(pairs: &[(&str, &str)]) -> GlossaryDictionary {
        pairs.iter().copied().collect()
    }

    #[test]
    fn splits_around_a_term() {
        let d = dict(&[("سيادة", "السلطة العليا...")]);
        let annotator = Annotator::new(&d);
        let text = "مبدأ السيادة أساس الدولة";

        assert_eq!(
            annotator.annotate(text),
            vec![
                Segment::PlainText("مبدأ ال"),
                Segment::TermReference("سيادة"),
                Segment::PlainText(" أساس الدولة"),
            ]
        );
    }

    #[test]
    fn adjacent_terms_have_no_empty_gap() {
        let d = dict(&[("أ", "1"), ("ب", "2")]);
        let annotator = Annotator::new(&d);
        assert_eq!(
            annotator.annotate("أب"),
            vec![Segment::TermReference("أ"), Segment::TermReference("ب")]
        );
    }

    #[test]
    fn empty_input_yields_one_empty_plain_segment() {
        let d = dict(&[("دولة", "كيان")]);
        let annotator = Annotator::new(&d);
        assert_eq!(annotator.annotate(""), vec![Segment::PlainText("")]);
    }

    #[test]
    fn declaration_order_wins_over_length() {
        let d = dict(&[("دولة", "short"), ("دولة قومية", "long")]);
        let annotator = Annotator::new(&d);
        assert_eq!(
            annotator.annotate("دولة قومية"),
            vec![Segment::TermReference("دولة"), Segment::PlainText(" قومية")]
        );

        let d = dict(&[("دولة قومية", "long"), ("دولة", "short")]);
        let annotator = Annotator::new(&d);
        assert_eq!(annotator.annotate("دولة قومية"), vec![Segment::TermReference("دولة قومية")]);
    }

    #[test]
    fn pattern_characters_are_literal() {
        let d = dict(&[("a.c", "dot"), ("x|y", "pipe"), ("[z]", "class")]);
        let annotator = Annotator::new(&d);
        assert_eq!(annotator.annotate("abc"), vec![Segment::PlainText("abc")]);
        assert_eq!(annotator.annotate("x"), vec![Segment::PlainText("x")]);
        assert_eq!(
            annotator.annotate("a.c x|y [z]"),
            vec![
                Segment::TermReference("a.c"),
                Segment::PlainText(" "),
                Segment::TermReference("x|y"),
                Segment::PlainText(" "),
                Segment::TermReference("[z]"),
            ]
        );
    }

    #[test]
    fn newlines_stay_inside_plain_text() {
        let d = dict(&[("ميثاق", "وثيقة")]);
        let annotator = Annotator::new(&d);
        let text = "السطر الأول\nثم ميثاق\n";
        let segments = annotator.annotate(text);
        assert_eq!(segments[0], Segment::PlainText("السطر الأول\nثم "));
        assert_eq!(segments.last(), Some(&Segment::PlainText("\n")));
        assert_eq!(concat(&segments), text);
    }

    #[test]
    fn non_string_values_yield_nothing() {
        let d = dict(&[("دولة", "كيان")]);
        let annotator = Annotator::new(&d);
        assert!(annotator.annotate_value(None).is_empty());
        assert!(annotator.annotate_value(Some(&Value::Null)).is_empty());
        assert!(annotator.annotate_value(Some(&serde_json::json!(42))).is_empty());
        assert!(annotator
            .annotate_value(Some(&serde_json::json!(["دولة"])))
            .is_empty());

        let text = serde_json::json!("دولة");
        assert_eq!(
            annotator.annotate_value(Some(&text)),
            vec![Segment::TermReference("دولة")]
        );
    }

    #[test]
    fn segments_serialize_with_kind_tag() {
        let json = serde_json::to_string(&Segment::TermReference("سيادة")).unwrap();
        assert_eq!(json, r#"{"kind":"term_reference","text":"سيادة"}"#);
    }
}
