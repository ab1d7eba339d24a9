use regex::Regex;
use std::sync::OnceLock;

/// One line of rich text: an optional bullet and a run of spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichLine<'t> {
    pub is_list_item: bool,
    pub spans: Vec<RichSpan<'t>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RichSpan<'t> {
    pub text: &'t str,
    pub bold: bool,
}

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*.*?\*\*").expect("static pattern"))
}

/// Parses `* ` list items and `**bold**` spans, one `RichLine` per input
/// line. Glossary annotation happens later, per span.
pub fn parse_rich(text: &str) -> Vec<RichLine<'_>> {
    text.split('\n')
        .map(|line| {
            let mut content = line.trim();
            let is_list_item = content.starts_with("* ");
            if is_list_item {
                content = &content[2..];
            }

            let mut spans = Vec::new();
            let mut cursor = 0;
            for m in bold_pattern().find_iter(content) {
                if m.start() > cursor {
                    spans.push(RichSpan {
                        text: &content[cursor..m.start()],
                        bold: false,
                    });
                }
                let inner = &content[m.start() + 2..m.end() - 2];
                spans.push(RichSpan { text: inner, bold: true });
                cursor = m.end();
            }
            if cursor < content.len() || spans.is_empty() {
                spans.push(RichSpan {
                    text: &content[cursor..],
                    bold: false,
                });
            }

            RichLine { is_list_item, spans }
        })
        .collect()
}
