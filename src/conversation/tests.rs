//! Unit tests for the submit flow.

use super::*;
use crate::knowledge::{KnowledgeBase, ResponseMatcher, FALLBACK_RESPONSE};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::watch;

fn matcher() -> ResponseMatcher {
    ResponseMatcher::new(Arc::new(KnowledgeBase::builtin()))
}

fn conversation_with(delay: Arc<dyn DelayStrategy>) -> Conversation {
    Conversation::new(
        matcher(),
        ConversationOptions {
            delay,
            ..Default::default()
        },
    )
}

fn instant() -> Conversation {
    conversation_with(Arc::new(NoDelay))
}

/// Records the composing flag as seen from inside the delay. The receiver is
/// bound after construction since it must watch the conversation it lives in.
struct RecordingDelay {
    composing: Arc<OnceLock<watch::Receiver<bool>>>,
    saw_composing: Arc<AtomicBool>,
}

#[async_trait]
impl DelayStrategy for RecordingDelay {
    fn next_delay(&self) -> Duration {
        Duration::ZERO
    }

    async fn wait(&self) {
        if let Some(rx) = self.composing.get() {
            self.saw_composing.store(*rx.borrow(), Ordering::SeqCst);
        }
    }
}

#[tokio::test]
async fn starts_with_welcome_turn() {
    let convo = instant();
    let turns = convo.transcript().await;
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role, Role::Assistant);
    assert_eq!(turns[0].content, WELCOME_MESSAGE);
    assert_eq!(turns[0].id, TurnId(0));
}

#[tokio::test]
async fn blank_submissions_are_no_ops() {
    let convo = instant();
    assert_eq!(convo.submit("").await, Submission::Ignored(Rejection::Empty));
    assert_eq!(convo.submit("   ").await, Submission::Ignored(Rejection::Empty));
    assert_eq!(convo.len().await, 1);
    assert!(!convo.is_composing());
}

#[tokio::test]
async fn explain_tara_appends_exactly_two_turns() {
    let convo = instant();
    let outcome = convo.submit("Explain TARA").await;
    assert_eq!(
        outcome,
        Submission::Answered {
            user: TurnId(1),
            assistant: TurnId(2)
        }
    );

    let turns = convo.transcript().await;
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[1].role, Role::User);
    assert_eq!(turns[1].content, "Explain TARA");
    assert_eq!(turns[2].role, Role::Assistant);
    assert!(turns[2].content.starts_with("**TARA (Module 2)**"));
}

#[tokio::test]
async fn overview_question_gets_overview() {
    let convo = instant();
    convo.submit("What is SASTRA AI?").await;
    assert_eq!(convo.len().await, 3);
    let turns = convo.transcript().await;
    assert_eq!(turns[1].role, Role::User);
    assert_eq!(turns[1].content, "What is SASTRA AI?");
    let last = convo.last_turn().await.unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert!(last.content.starts_with("**SASTRA AI Samudra Mathanam**"));
}

#[tokio::test]
async fn unknown_question_gets_fallback() {
    let convo = instant();
    convo.submit("hello").await;
    assert_eq!(convo.last_turn().await.unwrap().content, FALLBACK_RESPONSE);
}

#[tokio::test]
async fn user_text_is_stored_as_typed() {
    let convo = instant();
    convo.submit("  tara  ").await;
    assert_eq!(convo.transcript().await[1].content, "  tara  ");
}

#[tokio::test]
async fn ids_follow_insertion_order() {
    let convo = instant();
    convo.submit("trl").await;
    convo.submit("impact").await;
    let ids: Vec<_> = convo.transcript().await.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TurnId(0), TurnId(1), TurnId(2), TurnId(3), TurnId(4)]);
}

#[tokio::test]
async fn composing_is_visible_during_delay_only() {
    let slot: Arc<OnceLock<watch::Receiver<bool>>> = Arc::default();
    let saw = Arc::new(AtomicBool::new(false));
    let convo = conversation_with(Arc::new(RecordingDelay {
        composing: slot.clone(),
        saw_composing: saw.clone(),
    }));
    slot.set(convo.subscribe_composing()).unwrap();

    assert!(!convo.is_composing());
    convo.submit("trl").await;
    assert!(saw.load(Ordering::SeqCst));
    assert!(!convo.is_composing());
}

#[tokio::test]
async fn overlapping_submission_is_ignored() {
    let convo = Arc::new(conversation_with(Arc::new(FixedDelay(Duration::from_millis(50)))));
    let mut composing = convo.subscribe_composing();

    let first = tokio::spawn({
        let convo = convo.clone();
        async move { convo.submit("trl").await }
    });
    composing.wait_for(|busy| *busy).await.unwrap();

    assert_eq!(convo.submit("impact").await, Submission::Ignored(Rejection::Busy));
    assert!(matches!(first.await.unwrap(), Submission::Answered { .. }));

    let turns = convo.transcript().await;
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[1].content, "trl");
}

#[tokio::test]
async fn dropped_submit_clears_composing() {
    let convo = conversation_with(Arc::new(FixedDelay(Duration::from_secs(60))));
    let result = tokio::time::timeout(Duration::from_millis(10), convo.submit("trl")).await;
    assert!(result.is_err());
    assert!(!convo.is_composing());
    // The user turn was already appended; no reply follows.
    assert_eq!(convo.len().await, 2);
}

#[tokio::test]
async fn send_input_submits_and_clears_buffer() {
    let convo = instant();
    assert!(!convo.can_send().await);

    convo.set_input("   ").await;
    assert!(!convo.can_send().await);
    assert_eq!(convo.send_input().await, Submission::Ignored(Rejection::Empty));

    convo.set_input("Tech Stack").await;
    assert!(convo.can_send().await);
    assert!(matches!(convo.send_input().await, Submission::Answered { .. }));
    assert_eq!(convo.input().await, "");
    assert!(convo
        .last_turn()
        .await
        .unwrap()
        .content
        .starts_with("**Technical Architecture:**"));
}

#[tokio::test]
async fn suggestions_vanish_once_conversation_starts() {
    let convo = instant();
    assert_eq!(
        convo.suggestions().await,
        ["What is SASTRA AI?", "Explain TARA", "Tech Stack"]
    );

    assert!(matches!(
        convo.submit_suggestion(1).await,
        Submission::Answered { .. }
    ));
    assert_eq!(convo.transcript().await[1].content, "Explain TARA");
    assert!(convo.suggestions().await.is_empty());
    assert_eq!(
        convo.submit_suggestion(0).await,
        Submission::Ignored(Rejection::NoSuchSuggestion)
    );
}

#[tokio::test]
async fn out_of_range_suggestion_is_rejected() {
    let convo = instant();
    assert_eq!(
        convo.submit_suggestion(7).await,
        Submission::Ignored(Rejection::NoSuchSuggestion)
    );
    assert_eq!(convo.len().await, 1);
}

#[test]
fn transcript_push_assigns_sequential_ids() {
    let mut transcript = Transcript::seeded("hi");
    assert_eq!(transcript.push(Role::User, "q"), TurnId(1));
    assert_eq!(transcript.push(Role::Assistant, "a"), TurnId(2));
    assert_eq!(transcript.len(), 3);
}

#[test]
fn turns_serialize_with_lowercase_roles() {
    let mut transcript = Transcript::seeded("hi");
    transcript.push(Role::User, "q");
    let json = serde_json::to_value(transcript.turns()).unwrap();
    assert_eq!(json[0]["role"], "assistant");
    assert_eq!(json[1]["role"], "user");
    assert_eq!(json[1]["id"], 1);
}
