// Log entries and the envelope they travel through handler queues in

use crate::level::Level;
use chrono::{DateTime, Local};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// A single `key=value` pair attached to an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: String,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Build a [`Field`] from a key and any displayable value
#[allow(non_snake_case)]
pub fn F(key: impl Into<String>, value: impl fmt::Display) -> Field {
    Field {
        key: key.into(),
        value: value.to_string(),
    }
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct Entry {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Local>,
    /// Monotonic creation time, origin of the elapsed counter
    pub created: Instant,
    /// Fields in insertion order
    pub fields: Vec<Field>,
    /// Elapsed time of a closed trace span
    pub duration: Option<Duration>,
}

impl Entry {
    /// Create an entry stamped with the current time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
            created: Instant::now(),
            fields: Vec::new(),
            duration: None,
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Message followed by each field as ` key=value`
    pub fn summary(&self) -> String {
        let mut text = self.message.clone();
        for field in &self.fields {
            text.push(' ');
            text.push_str(&field.to_string());
        }
        text
    }
}

/// An entry on its way to one handler, plus the signal fired once the
/// handler is done with it
#[derive(Debug)]
pub struct Dispatch {
    pub entry: Arc<Entry>,
    done: oneshot::Sender<()>,
}

impl Dispatch {
    /// Wrap an entry, returning the receiver that resolves on completion
    pub fn new(entry: Arc<Entry>) -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self { entry, done: tx },
            rx,
        )
    }

    /// Signal the producer that the entry has been handled
    pub fn complete(self) {
        // The producer may have given up waiting
        let _ = self.done.send(());
    }
}
