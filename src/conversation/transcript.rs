//! Append-only transcript.

use super::turn::{ConversationTurn, Role, TurnId};

pub const WELCOME_MESSAGE: &str = "Welcome. I am **TARA**, the official Teaching & Assessment Reasoning Assistant. How may I assist you today?";

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    /// A transcript holding only the assistant's welcome turn.
    pub fn seeded(welcome: impl Into<String>) -> Self {
        let mut transcript = Self::default();
        transcript.push(Role::Assistant, welcome);
        transcript
    }

    /// Appends a turn and returns its id. There is no way to edit or remove turns.
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> TurnId {
        let id = TurnId(self.turns.len() as u64);
        self.turns.push(ConversationTurn::new(id, role, content));
        id
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
