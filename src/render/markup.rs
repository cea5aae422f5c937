//! Two-token lexer for turn content: plain text and `**emphasis**`.

use serde::Serialize;
use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Span {
    Plain(String),
    Emphasis(String),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(t) | Span::Emphasis(t) => t,
        }
    }
}

/// One rendered line block. May be empty (a blank line still takes up a row).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// The line's text with all markup removed.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }
}

fn emphasis_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Non-greedy so `**a** and **b**` yields two spans.
    PATTERN.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("static pattern is valid"))
}

/// Splits `content` into line blocks of tagged spans. Delimiters are stripped.
/// A leftover segment wrapped in `**` on both ends (`**`, `***`) is emphasis too;
/// any other stray `**` is kept as literal text.
pub fn render(content: &str) -> Vec<Line> {
    content.split('\n').map(render_line).collect()
}

pub fn render_line(line: &str) -> Line {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in emphasis_pattern().captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_span(&mut spans, uncaptured(&line[cursor..whole.start()]));
        push_span(&mut spans, Span::Emphasis(inner.as_str().to_string()));
        cursor = whole.end();
    }
    push_span(&mut spans, uncaptured(&line[cursor..]));

    Line { spans }
}

/// Text between regex matches. Still emphasis when it both starts and ends with
/// `**`, even if the two delimiters overlap.
fn uncaptured(segment: &str) -> Span {
    if segment.len() >= 2 && segment.starts_with("**") && segment.ends_with("**") {
        let inner = segment.get(2..segment.len() - 2).unwrap_or("");
        return Span::Emphasis(inner.to_string());
    }
    Span::Plain(segment.to_string())
}

fn push_span(spans: &mut Vec<Span>, span: Span) {
    if !span.text().is_empty() {
        spans.push(span);
    }
}
