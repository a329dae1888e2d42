use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of the human-readable creation stamp embedded in a [`ChatId`].
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Identifier of a chat within one tool.
///
/// The sequence number is allocated by the owning registry and strictly
/// increases with creation order; the stamp records the wall-clock second
/// of creation. Two chats created within the same second still differ by
/// sequence, and ordering follows the sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChatId {
    seq: u64,
    stamp: String,
}

impl ChatId {
    pub fn new(seq: u64, created_at: DateTime<Local>) -> Self {
        Self {
            seq,
            stamp: created_at.format(STAMP_FORMAT).to_string(),
        }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stamp, self.seq)
    }
}
