// Logger - handler registry and the entry points producing entries

mod span;

pub use span::TraceSpan;

use crate::entry::{Dispatch, Entry, Field};
use crate::error::Result;
use crate::level::Level;
use std::sync::Arc;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::{mpsc, oneshot};

/// Consumer of log entries
///
/// A handler owns a queue and a consumer draining it. `run` starts the
/// consumer and hands back the producer side; the consumer must complete
/// every [`Dispatch`] it receives once the entry is handled.
pub trait Handler: Send + Sync {
    /// Start consuming entries
    ///
    /// # Returns
    /// * `Ok(Sender)` - Producer side of the handler's queue
    /// * `Err(ConsoleError)` - Handler is already running or failed to start
    fn run(&self) -> Result<mpsc::Sender<Dispatch>>;

    /// Wait for the consumer to finish after every sender is dropped
    fn join(&self) {}
}

/// Registry of handlers and the facade used to log through them
///
/// The sync methods block until every handler registered for the entry's
/// level has handled it. Called from inside a tokio runtime they hand the
/// wait off the async scheduler; async code should still prefer
/// [`Logger::dispatch_async`] or [`EntryBuilder::log_async`].
///
/// Dropping the logger closes every queue, lets the handlers drain what is
/// left and waits for them.
pub struct Logger {
    channels: [Vec<mpsc::Sender<Dispatch>>; Level::COUNT],
    handlers: Vec<Arc<dyn Handler>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            channels: std::array::from_fn(|_| Vec::new()),
            handlers: Vec::new(),
        }
    }

    /// Start a handler and route the given levels to it
    ///
    /// # Arguments
    /// * `handler` - Handler to start
    /// * `levels` - Levels the handler receives; duplicates are ignored
    ///
    /// # Returns
    /// * `Ok(())` - Handler is running and registered
    /// * `Err(ConsoleError)` - Handler failed to start
    pub fn register_handler(&mut self, handler: Arc<dyn Handler>, levels: &[Level]) -> Result<()> {
        let sender = handler.run()?;

        let mut seen = [false; Level::COUNT];
        for level in levels {
            if !std::mem::replace(&mut seen[level.ordinal()], true) {
                self.channels[level.ordinal()].push(sender.clone());
            }
        }

        self.handlers.push(handler);
        Ok(())
    }

    /// Whether any handler receives entries of this level
    pub fn handles(&self, level: Level) -> bool {
        !self.channels[level.ordinal()].is_empty()
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Send an entry to every handler registered for its level and wait
    /// until all of them have handled it
    ///
    /// Safe to call from a runtime worker: a multi-thread runtime moves the
    /// wait out with `block_in_place`, a current-thread runtime waits on a
    /// scoped thread outside the runtime context.
    pub fn dispatch(&self, entry: Entry) {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| self.dispatch_blocking(entry))
            }
            Ok(_) => std::thread::scope(|scope| {
                scope.spawn(|| self.dispatch_blocking(entry));
            }),
            Err(_) => self.dispatch_blocking(entry),
        }
    }

    fn dispatch_blocking(&self, entry: Entry) {
        let channels = &self.channels[entry.level.ordinal()];
        if channels.is_empty() {
            return;
        }

        let entry = Arc::new(entry);
        let mut pending = Vec::with_capacity(channels.len());
        for sender in channels {
            let (dispatch, done) = Dispatch::new(Arc::clone(&entry));
            if sender.blocking_send(dispatch).is_err() {
                tracing::warn!(level = %entry.level, "Handler queue closed, entry skipped");
                continue;
            }
            pending.push(done);
        }

        for done in pending {
            let _ = done.blocking_recv();
        }
    }

    /// Async variant of [`Logger::dispatch`]
    pub async fn dispatch_async(&self, entry: Entry) {
        let channels = &self.channels[entry.level.ordinal()];
        if channels.is_empty() {
            return;
        }

        let entry = Arc::new(entry);
        let mut pending: Vec<oneshot::Receiver<()>> = Vec::with_capacity(channels.len());
        for sender in channels {
            let (dispatch, done) = Dispatch::new(Arc::clone(&entry));
            if sender.send(dispatch).await.is_err() {
                tracing::warn!(level = %entry.level, "Handler queue closed, entry skipped");
                continue;
            }
            pending.push(done);
        }

        for done in pending {
            let _ = done.await;
        }
    }

    /// Start an entry carrying fields
    pub fn with_fields(&self, fields: Vec<Field>) -> EntryBuilder<'_> {
        EntryBuilder {
            logger: self,
            fields,
        }
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.with_fields(Vec::new()).log(level, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    /// Same as [`Logger::info`]
    pub fn print(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn notice(&self, message: impl Into<String>) {
        self.log(Level::Notice, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn alert(&self, message: impl Into<String>) {
        self.log(Level::Alert, message);
    }

    /// Log at panic level, then panic with the message
    pub fn panic(&self, message: impl Into<String>) -> ! {
        self.with_fields(Vec::new()).panic(message)
    }

    /// Open a trace span; the trace entry is logged when the span ends
    pub fn trace(&self, message: impl Into<String>) -> TraceSpan<'_> {
        self.with_fields(Vec::new()).trace(message)
    }

    /// Close every queue and wait for the handlers to drain them
    pub fn shutdown(self) {
        drop(self);
    }

    fn close(&mut self) {
        for channels in &mut self.channels {
            channels.clear();
        }
        for handler in self.handlers.drain(..) {
            handler.join();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

/// An entry under construction with its fields already attached
pub struct EntryBuilder<'a> {
    logger: &'a Logger,
    fields: Vec<Field>,
}

impl<'a> EntryBuilder<'a> {
    fn into_entry(self, level: Level, message: impl Into<String>) -> (&'a Logger, Entry) {
        (self.logger, Entry::new(level, message).with_fields(self.fields))
    }

    pub fn log(self, level: Level, message: impl Into<String>) {
        let (logger, entry) = self.into_entry(level, message);
        logger.dispatch(entry);
    }

    pub async fn log_async(self, level: Level, message: impl Into<String>) {
        let (logger, entry) = self.into_entry(level, message);
        logger.dispatch_async(entry).await;
    }

    pub fn debug(self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn print(self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn notice(self, message: impl Into<String>) {
        self.log(Level::Notice, message);
    }

    pub fn warn(self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    pub fn error(self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn alert(self, message: impl Into<String>) {
        self.log(Level::Alert, message);
    }

    /// Log at panic level, then panic with the message and ` key=value`
    /// for each field
    pub fn panic(self, message: impl Into<String>) -> ! {
        let (logger, entry) = self.into_entry(Level::Panic, message);
        let summary = entry.summary();
        logger.dispatch(entry);
        panic!("{}", summary);
    }

    pub fn trace(self, message: impl Into<String>) -> TraceSpan<'a> {
        TraceSpan::new(self.logger, message.into(), self.fields)
    }
}
