use crate::intake::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub(crate) u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the conversation log. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
}

impl Message {
    pub fn user(id: MessageId, text: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            timestamp,
            category: None,
        }
    }

    pub fn assistant(
        id: MessageId,
        text: impl Into<String>,
        category: Option<Category>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Assistant,
            timestamp,
            category,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Category the reply was routed by. `None` for user messages and the greeting.
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn is_user(&self) -> bool {
        matches!(self.sender, Sender::User)
    }
}
