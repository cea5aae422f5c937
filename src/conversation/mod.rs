//! In-memory chat session state.
//! Holds the ordered transcript, feeds each user turn to the matcher after a
//! synthetic typing delay, and refuses overlapping submissions.

pub mod delay;
pub mod session;
pub mod transcript;
pub mod turn;

pub use delay::{DelayError, DelayStrategy, FixedDelay, NoDelay, RandomDelay};
pub use session::{Conversation, ConversationOptions, Rejection, Submission};
pub use transcript::{Transcript, WELCOME_MESSAGE};
pub use turn::{ConversationTurn, Role, TurnId};

#[cfg(test)]
mod tests;
