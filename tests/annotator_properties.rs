use intl_society::content::ContentStore;
use intl_society::glossary::{concat, Annotator, DefinitionPopup, GlossaryDictionary, PopupState, Segment};
use serde_json::json;

fn dict(pairs: &[(&str, &str)]) -> GlossaryDictionary {
    pairs.iter().copied().collect()
}

/// Every prose string in the bundled lecture, plus some awkward inputs.
fn corpus() -> Vec<String> {
    let store = ContentStore::builtin();
    let doc = serde_yaml_ng::to_string(store.document()).unwrap();
    let mut texts: Vec<String> = doc.lines().map(str::to_string).collect();
    texts.push(doc);
    texts.extend(
        [
            "",
            " ",
            "\n\n",
            "سيادةسيادة",
            "مجتمع (دولي) مجتمع (دولي)",
            "((()))[]{}.*+?^$|\\",
            "line one\r\nline two",
            "🌍 المجتمع الدولي 🌍",
        ]
        .map(str::to_string),
    );
    texts
}

fn dictionaries() -> Vec<GlossaryDictionary> {
    vec![
        GlossaryDictionary::new(),
        ContentStore::builtin().glossary().clone(),
        dict(&[("مجتمع (دولي)", "x"), ("(", "paren"), ("\\", "slash")]),
        dict(&[("دولة", "a"), ("دولة قومية", "b"), ("سيادة", "c")]),
        dict(&[(".*", "star"), ("^", "caret"), ("$", "dollar"), ("|", "pipe")]),
    ]
}

#[test]
fn round_trip_reconstructs_input() {
    for d in dictionaries() {
        let annotator = Annotator::new(&d);
        for text in corpus() {
            let segments = annotator.annotate(&text);
            assert_eq!(concat(&segments), text, "dictionary of {} terms", d.len());
        }
    }
}

#[test]
fn every_term_alone_is_one_reference() {
    for d in dictionaries() {
        let annotator = Annotator::new(&d);
        let terms: Vec<&str> = d.terms().collect();
        for (i, term) in terms.iter().enumerate() {
            // an earlier term that prefixes this one wins the tie
            if terms[..i].iter().any(|t| term.starts_with(t)) {
                continue;
            }
            assert_eq!(annotator.annotate(term), vec![Segment::TermReference(*term)], "term {:?}", term);
        }
    }
}

#[test]
fn earlier_declared_prefix_wins() {
    let d = dict(&[("دولة", "a"), ("دولة قومية", "b")]);
    let annotator = Annotator::new(&d);
    assert_eq!(
        annotator.annotate("دولة قومية"),
        vec![Segment::TermReference("دولة"), Segment::PlainText(" قومية")]
    );
}

#[test]
fn term_references_are_always_dictionary_keys() {
    for d in dictionaries() {
        let annotator = Annotator::new(&d);
        for text in corpus() {
            for segment in annotator.segments(&text) {
                if let Some(term) = segment.term() {
                    assert!(d.contains(term));
                }
            }
        }
    }
}

#[test]
fn text_without_terms_is_plain() {
    let d = dict(&[("X", "def")]);
    let annotator = Annotator::new(&d);
    let text = "لا يوجد تطابق هنا";
    assert_eq!(annotator.annotate(text), vec![Segment::PlainText(text)]);

    let d = ContentStore::builtin().glossary();
    let annotator = Annotator::new(d);
    let text = "hello world, nothing Arabic here";
    assert!(annotator.annotate(text).iter().all(|s| s.term().is_none()));
}

#[test]
fn empty_dictionary_returns_single_plain_segment() {
    let d = GlossaryDictionary::new();
    let annotator = Annotator::new(&d);
    for text in corpus() {
        assert_eq!(annotator.annotate(&text), vec![Segment::PlainText(&text)]);
    }
}

#[test]
fn parenthesised_term_is_matched_literally() {
    let d = dict(&[("مجتمع (دولي)", "تعريف")]);
    let annotator = Annotator::new(&d);

    assert_eq!(
        annotator.annotate("هذا مجتمع (دولي) حقيقي"),
        vec![
            Segment::PlainText("هذا "),
            Segment::TermReference("مجتمع (دولي)"),
            Segment::PlainText(" حقيقي"),
        ]
    );
    // without the parentheses it is not the term
    assert_eq!(annotator.annotate("مجتمع دولي"), vec![Segment::PlainText("مجتمع دولي")]);
    assert_eq!(annotator.annotate("(((")[0], Segment::PlainText("((("));
}

#[test]
fn popup_keeps_only_the_latest_term() {
    let d = dict(&[("أ", "1"), ("ب", "2")]);
    let mut popup = DefinitionPopup::new();
    popup.click_term(&d, "أ");
    popup.click_term(&d, "ب");
    assert_eq!(popup.state(), &PopupState::Open("ب".to_string()));
    assert_eq!(popup.active_term(), Some("ب"));
}

#[test]
fn sovereignty_scenario() {
    let d = dict(&[("سيادة", "السلطة العليا...")]);
    let annotator = Annotator::new(&d);
    let segments = annotator.annotate("مبدأ السيادة أساس الدولة");
    assert_eq!(
        segments,
        vec![
            Segment::PlainText("مبدأ ال"),
            Segment::TermReference("سيادة"),
            Segment::PlainText(" أساس الدولة"),
        ]
    );
}

#[test]
fn malformed_values_do_not_panic() {
    let d = dict(&[("سيادة", "def")]);
    let annotator = Annotator::new(&d);
    for value in [json!(null), json!(3.5), json!(true), json!({"text": "سيادة"}), json!([])] {
        assert!(annotator.annotate_value(Some(&value)).is_empty());
    }
    assert!(annotator.annotate_value(None).is_empty());
}
