//! Draws rendered turns for a terminal.

use super::markup::{render, Line, Span};
use crate::conversation::{ConversationTurn, Role};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStyle {
    /// Emphasis as ANSI bold.
    Ansi,
    /// Markup stripped, no escapes.
    Plain,
}

impl TerminalStyle {
    /// `Plain` when `NO_COLOR` is set, `Ansi` otherwise.
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            TerminalStyle::Plain
        } else {
            TerminalStyle::Ansi
        }
    }
}

pub fn draw_line(line: &Line, style: TerminalStyle) -> String {
    let mut out = String::new();
    for span in &line.spans {
        match (span, style) {
            (Span::Emphasis(text), TerminalStyle::Ansi) => {
                out.push_str(BOLD);
                out.push_str(text);
                out.push_str(RESET);
            }
            (span, _) => out.push_str(span.text()),
        }
    }
    out
}

pub fn draw_content(content: &str, style: TerminalStyle) -> String {
    render(content)
        .iter()
        .map(|line| draw_line(line, style))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A turn with a speaker label; continuation lines are indented under the text.
pub fn draw_turn(turn: &ConversationTurn, style: TerminalStyle) -> String {
    let label = match turn.role {
        Role::User => "You",
        Role::Assistant => "TARA",
    };
    let indent = " ".repeat(label.len() + 2);
    draw_content(&turn.content, style)
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{label}: {line}")
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
