//! One chat session: transcript, pending input, composing flag, and the submit loop.

use super::delay::{DelayStrategy, RandomDelay};
use super::transcript::{Transcript, WELCOME_MESSAGE};
use super::turn::{ConversationTurn, Role, TurnId};
use crate::knowledge::ResponseMatcher;
use crate::preprocessing::Cleaner;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub const DEFAULT_SUGGESTIONS: [&str; 3] = ["What is SASTRA AI?", "Explain TARA", "Tech Stack"];

/// Suggestions are offered while the transcript is shorter than this.
pub const DEFAULT_SUGGESTION_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Blank after trimming.
    Empty,
    /// Another reply is still being composed.
    Busy,
    /// Suggestion index out of range or suggestions not on offer.
    NoSuchSuggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Answered { user: TurnId, assistant: TurnId },
    Ignored(Rejection),
}

/// Construction options for a [`Conversation`].
pub struct ConversationOptions {
    pub welcome: String,
    pub suggestions: Vec<String>,
    pub suggestion_threshold: usize,
    pub delay: Arc<dyn DelayStrategy>,
}

impl Default for ConversationOptions {
    fn default() -> Self {
        Self {
            welcome: WELCOME_MESSAGE.to_string(),
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
            delay: Arc::new(RandomDelay::default()),
        }
    }
}

/// Public handle to a chat session. Share it as `Arc<Conversation>`.
pub struct Conversation {
    session_id: Uuid,
    matcher: ResponseMatcher,
    delay: Arc<dyn DelayStrategy>,
    suggestions: Vec<String>,
    suggestion_threshold: usize,
    transcript: RwLock<Transcript>,
    input: Mutex<String>,
    composing: watch::Sender<bool>,
    // Held for the whole of one submit; `try_lock` failing means busy.
    in_flight: Mutex<()>,
}

/// Clears the composing flag even if the submit future is dropped mid-delay.
struct ComposingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> ComposingGuard<'a> {
    fn enter(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for ComposingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl Conversation {
    pub fn new(matcher: ResponseMatcher, options: ConversationOptions) -> Self {
        let session_id = Uuid::new_v4();
        let (composing, _) = watch::channel(false);
        info!(%session_id, "Conversation started");
        Self {
            session_id,
            matcher,
            delay: options.delay,
            suggestions: options.suggestions,
            suggestion_threshold: options.suggestion_threshold,
            transcript: RwLock::new(Transcript::seeded(options.welcome)),
            input: Mutex::new(String::new()),
            composing,
            in_flight: Mutex::new(()),
        }
    }

    /// Conversation over the process-wide knowledge table with default options.
    pub fn with_defaults() -> Self {
        Self::new(ResponseMatcher::global(), ConversationOptions::default())
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Drive one exchange: user turn, delay, assistant turn.
    #[instrument(skip_all, fields(session_id = %self.session_id))]
    pub async fn submit(&self, text: &str) -> Submission {
        let text = match Cleaner::check_submission(text) {
            Ok(text) => text,
            Err(_) => {
                debug!("Ignoring blank submission");
                return Submission::Ignored(Rejection::Empty);
            }
        };

        let Ok(_slot) = self.in_flight.try_lock() else {
            debug!("Ignoring submission while a reply is being composed");
            return Submission::Ignored(Rejection::Busy);
        };

        let user = self.transcript.write().await.push(Role::User, text);
        self.input.lock().await.clear();

        let assistant = {
            let _composing = ComposingGuard::enter(&self.composing);
            self.delay.wait().await;
            let reply = self.matcher.select_response(text);
            self.transcript.write().await.push(Role::Assistant, reply)
        };

        info!(%user, %assistant, "Assistant replied");
        Submission::Answered { user, assistant }
    }

    /// Submit whatever is in the input buffer.
    pub async fn send_input(&self) -> Submission {
        let text = self.input.lock().await.clone();
        self.submit(&text).await
    }

    /// Submit the `index`th quick prompt, if suggestions are currently on offer.
    pub async fn submit_suggestion(&self, index: usize) -> Submission {
        let suggestion = match self.suggestions().await.get(index) {
            Some(s) => s.clone(),
            None => return Submission::Ignored(Rejection::NoSuchSuggestion),
        };
        self.submit(&suggestion).await
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        *self.input.lock().await = text.into();
    }

    pub async fn input(&self) -> String {
        self.input.lock().await.clone()
    }

    /// Whether a send would currently be accepted.
    pub async fn can_send(&self) -> bool {
        !self.is_composing() && !self.input.lock().await.trim().is_empty()
    }

    /// Quick prompts; empty once the conversation is under way or while composing.
    pub async fn suggestions(&self) -> &[String] {
        if self.is_composing() || self.len().await >= self.suggestion_threshold {
            return &[];
        }
        &self.suggestions
    }

    pub fn is_composing(&self) -> bool {
        *self.composing.borrow()
    }

    /// Watch the composing flag, e.g. to drive a typing indicator.
    pub fn subscribe_composing(&self) -> watch::Receiver<bool> {
        self.composing.subscribe()
    }

    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        self.transcript.read().await.turns().to_vec()
    }

    pub async fn last_turn(&self) -> Option<ConversationTurn> {
        self.transcript.read().await.last().cloned()
    }

    pub async fn len(&self) -> usize {
        self.transcript.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transcript.read().await.is_empty()
    }
}
