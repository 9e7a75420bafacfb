use std::{borrow::Cow, str::Utf8Error};

use crate::PartitionId;
pub use time::OffsetDateTime as Timestamp;

/// Position of an event within its partition. Aka. offset.
pub type SeqNo = u64;

/// Canonical display format for Timestamp.
pub const TIMESTAMP_FORMAT: &[time::format_description::FormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// An event as delivered by the hub. It owns its body, so it outlives the session that read it.
pub struct PartitionEvent {
    partition: PartitionId,
    sequence: Option<SeqNo>,
    enqueued_time: Option<Timestamp>,
    body: Vec<u8>,
}

impl PartitionEvent {
    pub fn new(partition: PartitionId, body: Vec<u8>) -> Self {
        Self {
            partition,
            sequence: None,
            enqueued_time: None,
            body,
        }
    }

    pub fn with_sequence(mut self, sequence: SeqNo) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_enqueued_time(mut self, timestamp: Timestamp) -> Self {
        self.enqueued_time = Some(timestamp);
        self
    }

    pub fn partition(&self) -> &PartitionId {
        &self.partition
    }

    pub fn sequence(&self) -> Option<SeqNo> {
        self.sequence
    }

    pub fn enqueued_time(&self) -> Option<Timestamp> {
        self.enqueued_time
    }

    pub fn size(&self) -> usize {
        self.body.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    /// Strict UTF-8 view of the body.
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    /// The body decoded as UTF-8; invalid sequences are replaced with `U+FFFD`.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
