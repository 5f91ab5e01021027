use std::fmt;

use serde::{Deserialize, Serialize};
use teloxide::types::ChatId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(i64);

impl RecipientId {
    pub fn new(inner: i64) -> Self {
        Self(inner)
    }

    pub fn chat_id(&self) -> ChatId {
        ChatId(self.0)
    }
}

impl From<ChatId> for RecipientId {
    fn from(value: ChatId) -> Self {
        Self(value.0)
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
