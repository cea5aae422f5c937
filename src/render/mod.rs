//! Presentation of turn content: markup lexing and terminal drawing.

pub mod markup;
pub mod terminal;

pub use markup::{render, render_line, Line, Span};
pub use terminal::{draw_content, draw_turn, TerminalStyle};
