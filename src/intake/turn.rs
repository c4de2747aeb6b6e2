use super::classifier::classify;
use super::responder::{GREETING, respond};
use super::store::ConversationStore;
use super::{IntakeError, IntakeResult};
use crate::config::AppConfig;
use crate::types::Message;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnId(u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    /// A user message is in the log and its reply is pending.
    AwaitingResponse { turn: TurnId, prompt: String },
}

struct TurnState {
    phase: TurnPhase,
    turns: u64,
}

/// Drives user turns through the conversation.
///
/// This is the only writer of its [`ConversationStore`]. Handles are cheap to
/// clone and all clones drive the same conversation.
#[derive(Clone)]
pub struct TurnController {
    store: ConversationStore,
    state: Arc<Mutex<TurnState>>,
    latency: Duration,
}

impl TurnController {
    /// Controller for a fresh conversation, seeded with the assistant
    /// greeting when the config asks for it.
    pub fn new(config: &AppConfig) -> Self {
        let controller = Self::with_latency(config.reply_latency);
        if config.greeting {
            let store = &controller.store;
            let greeting = Message::assistant(store.next_id(), GREETING, None, store.next_timestamp());
            if let Err(err) = store.append(greeting) {
                warn!("failed to seed greeting: {}", err);
            }
        }
        controller
    }

    /// Controller over an empty conversation.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            store: ConversationStore::new(),
            state: Arc::new(Mutex::new(TurnState {
                phase: TurnPhase::Idle,
                turns: 0,
            })),
            latency,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TurnState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a turn.
    ///
    /// A submission while a reply is pending is refused with
    /// [`IntakeError::TurnInProgress`] and its text is dropped. Blank text is
    /// refused with [`IntakeError::InvalidMessage`]. Neither touches the log.
    pub fn submit(&self, text: &str) -> IntakeResult<ScheduledReply> {
        let mut state = self.lock();
        if let TurnPhase::AwaitingResponse { turn, .. } = &state.phase {
            debug!(pending = %turn, "submission refused, turn in progress");
            return Err(IntakeError::TurnInProgress);
        }

        let prompt = text.trim();
        if prompt.is_empty() {
            debug!("submission refused, blank text");
            return Err(IntakeError::InvalidMessage);
        }

        let message = Message::user(self.store.next_id(), prompt, self.store.next_timestamp());
        self.store.append(message)?;

        state.turns += 1;
        let turn = TurnId(state.turns);
        state.phase = TurnPhase::AwaitingResponse {
            turn,
            prompt: prompt.to_string(),
        };
        debug!(%turn, latency_ms = self.latency.as_millis() as u64, "turn started");

        Ok(ScheduledReply {
            turn,
            delay: self.latency,
            controller: self.clone(),
        })
    }

    /// Produce and append the assistant reply for `turn`, returning to idle.
    pub fn complete(&self, turn: TurnId) -> IntakeResult<Message> {
        let mut state = self.lock();
        let prompt = match &state.phase {
            TurnPhase::AwaitingResponse { turn: pending, prompt } if *pending == turn => {
                prompt.clone()
            }
            _ => {
                warn!(%turn, "completion for a turn that is not pending");
                return Err(IntakeError::NoTurnInFlight);
            }
        };
        state.phase = TurnPhase::Idle;

        let category = classify(&prompt);
        let reply = Message::assistant(
            self.store.next_id(),
            respond(category),
            Some(category),
            self.store.next_timestamp(),
        );
        self.store.append(reply.clone())?;
        debug!(%turn, ?category, "turn completed");
        Ok(reply)
    }

    /// Abandon `turn` without a reply. The user message stays in the log.
    /// Returns `false` when `turn` is not the pending turn.
    pub fn cancel(&self, turn: TurnId) -> bool {
        let mut state = self.lock();
        match &state.phase {
            TurnPhase::AwaitingResponse { turn: pending, .. } if *pending == turn => {
                state.phase = TurnPhase::Idle;
                debug!(%turn, "turn cancelled");
                true
            }
            _ => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.lock().phase, TurnPhase::AwaitingResponse { .. })
    }

    pub fn phase(&self) -> TurnPhase {
        self.lock().phase.clone()
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.store.snapshot()
    }

    /// Read handle onto the conversation log. Appending is crate-private,
    /// so callers can only observe it.
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }
}

/// The pending reply of a submitted turn.
///
/// Nothing happens until it is driven: [`run`](Self::run) waits out the
/// simulated latency, [`fire_now`](Self::fire_now) skips it, and
/// [`spawn`](Self::spawn) hands it to the tokio runtime. Dropping it leaves
/// the controller busy until the turn is cancelled.
#[must_use = "the turn stays busy until its reply is driven or cancelled"]
pub struct ScheduledReply {
    turn: TurnId,
    delay: Duration,
    controller: TurnController,
}

impl ScheduledReply {
    pub fn turn(&self) -> TurnId {
        self.turn
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn run(self) -> IntakeResult<Message> {
        tokio::time::sleep(self.delay).await;
        self.controller.complete(self.turn)
    }

    pub fn fire_now(self) -> IntakeResult<Message> {
        self.controller.complete(self.turn)
    }

    pub fn cancel(self) -> bool {
        self.controller.cancel(self.turn)
    }

    /// Run on a tokio task. Must be called from within a runtime.
    pub fn spawn(self) -> ReplyTask {
        let turn = self.turn;
        let controller = self.controller.clone();
        let handle = tokio::spawn(self.run());
        ReplyTask {
            turn,
            controller,
            handle,
        }
    }
}

/// A [`ScheduledReply`] running on the tokio runtime.
pub struct ReplyTask {
    turn: TurnId,
    controller: TurnController,
    handle: JoinHandle<IntakeResult<Message>>,
}

impl ReplyTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the timer and abandon the turn. Returns `false` if the reply
    /// already landed.
    pub fn cancel(self) -> bool {
        self.handle.abort();
        self.controller.cancel(self.turn)
    }

    /// Wait for the reply. A panic inside the task is re-raised here; an
    /// aborted task reports [`IntakeError::NoTurnInFlight`].
    pub async fn join(self) -> IntakeResult<Message> {
        join_outcome(self.turn, self.handle.await)
    }
}

fn join_outcome(
    turn: TurnId,
    outcome: Result<IntakeResult<Message>, JoinError>,
) -> IntakeResult<Message> {
    match outcome {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => {
            warn!(%turn, "reply task stopped: {}", err);
            Err(IntakeError::NoTurnInFlight)
        }
    }
}
