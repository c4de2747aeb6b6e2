/// Conversational intake engine behind the chat screen.
///
/// Free text is routed through a keyword [`classifier`] to a canned
/// clarifying question from the [`responder`]. The [`TurnController`] owns the
/// [`ConversationStore`] and runs each turn through a simulated "assistant is
/// typing" delay.
///
/// # Usage
///
/// ```rust,no_run
/// use vitalis::intake::TurnController;
/// use std::time::Duration;
///
/// # async fn example() -> vitalis::intake::IntakeResult<()> {
/// let controller = TurnController::with_latency(Duration::from_millis(1500));
/// let reply = controller.submit("I have a headache")?;
/// let answer = reply.run().await?;
/// println!("{}", answer.text());
/// # Ok(())
/// # }
/// ```
pub mod classifier;
pub mod quick_actions;
pub mod responder;
pub mod store;
pub mod turn;

use crate::types::MessageId;

pub use classifier::{Category, RULES, Rule, classify};
pub use quick_actions::QuickAction;
pub use responder::{GREETING, respond};
pub use store::ConversationStore;
pub use turn::{ReplyTask, ScheduledReply, TurnController, TurnId, TurnPhase};

/// Conditions the intake engine refuses. None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("Message text is empty")]
    InvalidMessage,

    #[error("A reply is already being composed")]
    TurnInProgress,

    #[error("No matching turn is awaiting a reply")]
    NoTurnInFlight,

    #[error("Message {id} would be appended after {last}")]
    OutOfOrder { id: MessageId, last: MessageId },
}

pub type IntakeResult<T> = Result<T, IntakeError>;
