use super::{IntakeError, IntakeResult};
use crate::types::{Message, MessageId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use time::{Duration, OffsetDateTime};

/// Append-only, ordered conversation log.
///
/// Cloning yields another handle onto the same log. Appends take the write
/// lock for the push only, so a concurrent [`snapshot`](Self::snapshot) sees
/// either the log before or after the append.
///
/// Only the owning [`TurnController`](super::TurnController) writes; outside
/// the crate the log is read-only:
///
/// ```compile_fail
/// use vitalis::intake::TurnController;
/// use std::time::Duration;
///
/// let controller = TurnController::with_latency(Duration::from_millis(10));
/// let store = controller.store().clone();
/// let id = store.next_id();
/// ```
#[derive(Clone, Default)]
pub struct ConversationStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    counter: AtomicU64,
    entries: RwLock<Vec<Message>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Message>> {
        self.inner
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Message>> {
        self.inner
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mint an id that no earlier call on this log has returned.
    pub(crate) fn next_id(&self) -> MessageId {
        MessageId(self.inner.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Current time, nudged forward so it is strictly after the last entry.
    pub(crate) fn next_timestamp(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        match self.last() {
            Some(last) if now <= last.timestamp() => last.timestamp() + Duration::microseconds(1),
            _ => now,
        }
    }

    pub(crate) fn append(&self, message: Message) -> IntakeResult<()> {
        if message.is_user() && message.text().trim().is_empty() {
            return Err(IntakeError::InvalidMessage);
        }

        let mut entries = self.write();
        if let Some(last) = entries.last()
            && (message.id() <= last.id() || message.timestamp() < last.timestamp())
        {
            return Err(IntakeError::OutOfOrder {
                id: message.id(),
                last: last.id(),
            });
        }
        entries.push(message);
        Ok(())
    }

    /// Full history in append order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.read().clone()
    }

    pub fn last(&self) -> Option<Message> {
        self.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::Category;

    fn user(store: &ConversationStore, text: &str) -> Message {
        Message::user(store.next_id(), text, store.next_timestamp())
    }

    #[test]
    fn test_append_and_snapshot_order() {
        let store = ConversationStore::new();
        store.append(user(&store, "first")).unwrap();
        store.append(user(&store, "second")).unwrap();

        let texts: Vec<_> = store
            .snapshot()
            .iter()
            .map(|m| m.text().to_string())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_rejects_blank_user_message() {
        let store = ConversationStore::new();
        assert_eq!(
            store.append(user(&store, "  \n\t")),
            Err(IntakeError::InvalidMessage)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_blank_assistant_message_allowed() {
        let store = ConversationStore::new();
        let msg = Message::assistant(store.next_id(), "", None, store.next_timestamp());
        assert!(store.append(msg).is_ok());
    }

    #[test]
    fn test_rejects_out_of_order() {
        let store = ConversationStore::new();
        let early_id = store.next_id();
        let early_ts = store.next_timestamp();
        store.append(user(&store, "later")).unwrap();

        let result = store.append(Message::user(early_id, "stale", early_ts));
        assert!(matches!(result, Err(IntakeError::OutOfOrder { .. })));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let store = ConversationStore::new();
        for i in 0..50 {
            let msg = Message::assistant(
                store.next_id(),
                format!("reply {i}"),
                Some(Category::General),
                store.next_timestamp(),
            );
            store.append(msg).unwrap();
        }
        let snapshot = store.snapshot();
        assert!(
            snapshot
                .windows(2)
                .all(|pair| pair[0].timestamp() < pair[1].timestamp())
        );
    }

    #[test]
    fn test_clones_share_log() {
        let store = ConversationStore::new();
        let reader = store.clone();
        store.append(user(&store, "hello")).unwrap();
        assert_eq!(reader.len(), 1);
        assert_eq!(reader.last().map(|m| m.text().to_string()), Some("hello".into()));
    }
}
