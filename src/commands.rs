//! Terminal host commands: input parsing and dispatch against a conversation.

use crate::conversation::{Conversation, Rejection, Submission};
use crate::error::TaraResult;
use crate::render::{draw_turn, TerminalStyle};
use std::io::Write;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Chat(String),
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Suggest,
    /// 1-based suggestion number.
    Pick(usize),
    Transcript,
    Quit,
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
Type a question and press Enter.
  /suggest     list quick prompts
  /<n>         ask quick prompt n
  /transcript  print the conversation as JSON
  /help        show this help
  /quit        leave";

pub fn parse_input(text: &str) -> Task {
    let Some(rest) = text.trim_start().strip_prefix('/') else {
        return Task::Chat(text.to_string());
    };
    let cmd = rest.trim();
    let command = match cmd {
        "help" | "h" | "?" => Command::Help,
        "suggest" | "s" => Command::Suggest,
        "transcript" | "t" => Command::Transcript,
        "quit" | "q" | "exit" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => Command::Pick(n),
            _ => Command::Unknown(other.to_string()),
        },
    };
    Task::Command(command)
}

pub async fn write_suggestions<W: Write>(convo: &Conversation, out: &mut W) -> TaraResult<()> {
    let suggestions = convo.suggestions().await;
    if suggestions.is_empty() {
        return Ok(());
    }
    writeln!(out, "Try:")?;
    for (i, s) in suggestions.iter().enumerate() {
        writeln!(out, "  /{}  {}", i + 1, s)?;
    }
    Ok(())
}

pub async fn handle<W: Write>(
    convo: &Conversation,
    task: Task,
    out: &mut W,
    style: TerminalStyle,
) -> TaraResult<Flow> {
    match task {
        Task::Chat(text) => {
            let outcome = convo.submit(&text).await;
            write_outcome(convo, outcome, out, style).await?;
        }
        Task::Command(Command::Pick(n)) => {
            let outcome = convo.submit_suggestion(n - 1).await;
            write_outcome(convo, outcome, out, style).await?;
        }
        Task::Command(Command::Suggest) => {
            if convo.suggestions().await.is_empty() {
                writeln!(out, "No suggestions right now.")?;
            }
            write_suggestions(convo, out).await?;
        }
        Task::Command(Command::Transcript) => {
            let turns = convo.transcript().await;
            writeln!(out, "{}", serde_json::to_string_pretty(&turns)?)?;
        }
        Task::Command(Command::Help) => writeln!(out, "{HELP}")?,
        Task::Command(Command::Quit) => return Ok(Flow::Quit),
        Task::Command(Command::Unknown(cmd)) => {
            writeln!(out, "Unknown command /{cmd}. Type /help.")?;
        }
    }
    out.flush()?;
    Ok(Flow::Continue)
}

async fn write_outcome<W: Write>(
    convo: &Conversation,
    outcome: Submission,
    out: &mut W,
    style: TerminalStyle,
) -> TaraResult<()> {
    match outcome {
        Submission::Answered { .. } => {
            if let Some(turn) = convo.last_turn().await {
                writeln!(out, "{}", draw_turn(&turn, style))?;
            }
        }
        Submission::Ignored(Rejection::Empty) => {}
        Submission::Ignored(Rejection::Busy) => {
            warn!("Submission dropped, reply still in progress");
            writeln!(out, "Still answering, please wait.")?;
        }
        Submission::Ignored(Rejection::NoSuchSuggestion) => {
            writeln!(out, "No such suggestion. Type /suggest.")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ConversationOptions, NoDelay};
    use crate::knowledge::{KnowledgeBase, ResponseMatcher};
    use std::sync::Arc;

    fn convo() -> Conversation {
        Conversation::new(
            ResponseMatcher::new(Arc::new(KnowledgeBase::builtin())),
            ConversationOptions {
                delay: Arc::new(NoDelay),
                ..Default::default()
            },
        )
    }

    async fn run(convo: &Conversation, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = handle(convo, parse_input(line), &mut out, TerminalStyle::Plain)
            .await
            .unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_commands_and_chat() {
        assert_eq!(parse_input("Explain TARA"), Task::Chat("Explain TARA".into()));
        assert_eq!(parse_input("/quit"), Task::Command(Command::Quit));
        assert_eq!(parse_input(" /2 "), Task::Command(Command::Pick(2)));
        assert_eq!(
            parse_input("/0"),
            Task::Command(Command::Unknown("0".into()))
        );
        assert_eq!(
            parse_input("/dance"),
            Task::Command(Command::Unknown("dance".into()))
        );
    }

    #[tokio::test]
    async fn chat_prints_reply_without_markup() {
        let convo = convo();
        let (flow, out) = run(&convo, "trl").await;
        assert_eq!(flow, Flow::Continue);
        assert!(out.starts_with("TARA: We are at Technology Readiness Level (TRL) 6."));
    }

    #[tokio::test]
    async fn blank_line_prints_nothing() {
        let convo = convo();
        let (_, out) = run(&convo, "   ").await;
        assert!(out.is_empty());
        assert_eq!(convo.len().await, 1);
    }

    #[tokio::test]
    async fn pick_submits_suggestion() {
        let convo = convo();
        let (_, out) = run(&convo, "/3").await;
        assert!(out.starts_with("TARA: Technical Architecture:"));
        let (_, out) = run(&convo, "/1").await;
        assert_eq!(out, "No such suggestion. Type /suggest.\n");
    }

    #[tokio::test]
    async fn suggest_lists_prompts() {
        let convo = convo();
        let (_, out) = run(&convo, "/suggest").await;
        assert!(out.contains("/2  Explain TARA"));
    }

    #[tokio::test]
    async fn transcript_dumps_json() {
        let convo = convo();
        run(&convo, "impact").await;
        let (_, out) = run(&convo, "/transcript").await;
        let turns: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(turns.as_array().unwrap().len(), 3);
        assert_eq!(turns[1]["content"], "impact");
    }

    #[tokio::test]
    async fn quit_stops_loop() {
        let convo = convo();
        let (flow, _) = run(&convo, "/q").await;
        assert_eq!(flow, Flow::Quit);
    }
}
