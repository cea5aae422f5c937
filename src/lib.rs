//! # TARA
//!
//! FAQ assistant for the SASTRA AI Samudra Mathanam initiative. Questions are
//! answered from a static knowledge table by keyword scoring; the conversation
//! layer keeps the transcript and paces replies with a short typing delay.
//!
//! ```text
//! input → Cleaner (gate) → Conversation::submit → ResponseMatcher → transcript → render
//! ```

pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod knowledge;
pub mod logging;
pub mod preprocessing;
pub mod render;

pub use config::ChatConfig;
pub use conversation::{Conversation, ConversationOptions, Submission};
pub use error::{TaraError, TaraResult};
pub use knowledge::{KnowledgeBase, ResponseMatcher};

use crate::commands::{handle, parse_input, write_suggestions, Flow};
use crate::render::{draw_turn, TerminalStyle};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Builds a conversation from `config`, installing its knowledge table process-wide.
pub fn build_conversation(config: &ChatConfig) -> TaraResult<Conversation> {
    config.validate()?;
    if let Some(path) = &config.knowledge_path {
        knowledge::install(KnowledgeBase::from_path(path)?)?;
    }
    let options = ConversationOptions {
        welcome: config.welcome.clone(),
        suggestions: config.suggestions.clone(),
        suggestion_threshold: config.suggestion_threshold,
        delay: Arc::new(config.delay.strategy().map_err(config::ConfigError::from)?),
    };
    Ok(Conversation::new(ResponseMatcher::global(), options))
}

/// Terminal chat loop over stdin/stdout.
pub async fn run() -> TaraResult<()> {
    logging::init_tracing();
    let config = ChatConfig::from_env()?;
    let convo = build_conversation(&config)?;
    let style = TerminalStyle::detect();

    let mut out = std::io::stdout();
    if let Some(welcome) = convo.last_turn().await {
        writeln!(out, "{}", draw_turn(&welcome, style))?;
    }
    write_suggestions(&convo, &mut out).await?;

    // Typing indicator.
    let mut composing = convo.subscribe_composing();
    let indicator = tokio::spawn(async move {
        while composing.changed().await.is_ok() {
            if *composing.borrow_and_update() {
                println!("Processing...");
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if handle(&convo, parse_input(&line), &mut out, style).await? == Flow::Quit {
            break;
        }
    }

    indicator.abort();
    info!(session_id = %convo.session_id(), turns = convo.len().await, "Conversation ended");
    Ok(())
}
