use super::Logger;
use crate::entry::{Entry, Field};
use crate::level::Level;
use std::time::Instant;

/// Guard timing an operation
///
/// Ending the span, explicitly or by dropping the guard, logs one trace
/// entry with the span's message, fields and elapsed time. The entry is
/// logged exactly once, including when the guard is dropped during unwind.
pub struct TraceSpan<'a> {
    logger: &'a Logger,
    message: String,
    fields: Vec<Field>,
    start: Instant,
    ended: bool,
}

impl<'a> TraceSpan<'a> {
    pub(super) fn new(logger: &'a Logger, message: String, fields: Vec<Field>) -> Self {
        Self {
            logger,
            message,
            fields,
            start: Instant::now(),
            ended: false,
        }
    }

    /// Close the span and log its trace entry
    pub fn end(mut self) {
        if let Some(entry) = self.finish() {
            self.logger.dispatch(entry);
        }
    }

    /// Async variant of [`TraceSpan::end`]
    pub async fn end_async(mut self) {
        if let Some(entry) = self.finish() {
            self.logger.dispatch_async(entry).await;
        }
    }

    fn finish(&mut self) -> Option<Entry> {
        if std::mem::replace(&mut self.ended, true) {
            return None;
        }

        let entry = Entry::new(Level::Trace, std::mem::take(&mut self.message))
            .with_fields(std::mem::take(&mut self.fields))
            .with_duration(self.start.elapsed());
        Some(entry)
    }
}

impl Drop for TraceSpan<'_> {
    fn drop(&mut self) {
        if let Some(entry) = self.finish() {
            self.logger.dispatch(entry);
        }
    }
}
