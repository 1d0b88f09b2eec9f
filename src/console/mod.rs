// Console handler - renders entries as aligned, optionally colored text lines

mod format;

pub use format::{format_entry, MESSAGE_WIDTH};

use crate::color::ColorCode;
use crate::config::{validate_timestamp_format, ConsoleConfig, MAX_CHANNEL_BUFFER};
use crate::entry::{Dispatch, Entry};
use crate::error::{ConsoleError, Result};
use crate::level::Level;
use crate::logger::Handler;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Name of the renderer thread
const RENDERER_THREAD: &str = "console-renderer";

/// Everything the renderer reads while producing a line
struct ConsoleState {
    config: ConsoleConfig,
    writer: Box<dyn Write + Send>,
    /// Reference point of the mini-timestamp counter
    start: Instant,
}

impl ConsoleState {
    /// Format and write one entry with a single `write_all`
    fn render(&mut self, entry: &Entry) -> std::io::Result<()> {
        let elapsed = entry.created.saturating_duration_since(self.start);
        let line = format_entry(entry, &self.config, elapsed);
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()
    }
}

/// Handler writing entries to an output stream from a dedicated thread
///
/// Settings can be changed at any time through the setters; they take
/// effect from the next rendered entry. The channel buffer is read once,
/// when the handler is registered.
pub struct Console {
    state: Arc<Mutex<ConsoleState>>,
    failed_writes: Arc<AtomicU64>,
    running: AtomicBool,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Console {
    /// Create a console handler writing to stderr with default settings
    pub fn new() -> Self {
        Self::build(ConsoleConfig::default())
    }

    /// Create a console handler from a loaded configuration
    ///
    /// # Returns
    /// * `Ok(Console)` - Configuration is valid
    /// * `Err(ConsoleError)` - Configuration failed validation
    pub fn with_config(config: ConsoleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ConsoleConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(ConsoleState {
                config,
                writer: Box::new(std::io::stderr()),
                start: Instant::now(),
            })),
            failed_writes: Arc::new(AtomicU64::new(0)),
            running: AtomicBool::new(false),
            worker: Mutex::new(None),
        }
    }

    /// Replace the output stream
    pub fn set_writer<W: Write + Send + 'static>(&self, writer: W) {
        self.state.lock().writer = Box::new(writer);
    }

    /// Enable or disable ANSI colors
    pub fn display_color(&self, color: bool) {
        self.state.lock().config.color = color;
    }

    /// Set the color used for a level's label and field keys
    pub fn set_level_color(&self, level: Level, color: ColorCode) {
        self.state.lock().config.level_colors[level] = color;
    }

    /// Set the sequence closing every colored segment
    pub fn set_ansi_reset(&self, reset: impl Into<String>) {
        self.state.lock().config.ansi_reset = reset.into();
    }

    /// Set the strftime format of the calendar timestamp
    ///
    /// # Panics
    /// Panics if chrono cannot parse the format.
    pub fn set_timestamp_format(&self, format: impl Into<String>) {
        let format = format.into();
        validate_timestamp_format(&format).unwrap_or_else(|e| panic!("{}", e));
        self.state.lock().config.timestamp_format = format;
    }

    /// Render an elapsed counter instead of a calendar timestamp
    pub fn use_mini_timestamp(&self, mini: bool) {
        self.state.lock().config.mini_timestamp = mini;
    }

    /// Set the length of one tick of the elapsed counter
    ///
    /// # Panics
    /// Panics if `unit` is shorter than one millisecond.
    pub fn set_mini_timestamp_unit(&self, unit: Duration) {
        let millis = u64::try_from(unit.as_millis()).unwrap_or(u64::MAX);
        assert!(millis > 0, "mini timestamp unit must be at least 1ms");
        self.state.lock().config.mini_timestamp_unit_ms = millis;
    }

    /// Set the capacity of the entry queue, used when the handler starts
    ///
    /// # Panics
    /// Panics if `capacity` is zero or above [`MAX_CHANNEL_BUFFER`].
    pub fn set_channel_buffer(&self, capacity: usize) {
        assert!(capacity > 0, "channel buffer must be at least 1");
        assert!(
            capacity <= MAX_CHANNEL_BUFFER,
            "channel buffer cannot exceed {}",
            MAX_CHANNEL_BUFFER
        );
        self.state.lock().config.channel_buffer = capacity;
    }

    /// Snapshot of the current settings
    pub fn config(&self) -> ConsoleConfig {
        self.state.lock().config.clone()
    }

    /// Number of lines that could not be written to the output stream
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Consumer side of the entry queue
    fn render_loop(
        mut rx: mpsc::Receiver<Dispatch>,
        state: Arc<Mutex<ConsoleState>>,
        failed_writes: Arc<AtomicU64>,
    ) {
        tracing::debug!("Console renderer started");

        while let Some(dispatch) = rx.blocking_recv() {
            let result = state.lock().render(&dispatch.entry);
            if let Err(e) = result {
                failed_writes.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    level = %dispatch.entry.level,
                    error = %e,
                    "Failed to write log entry"
                );
            }
            dispatch.complete();
        }

        tracing::debug!("Console renderer stopped");
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for Console {
    fn run(&self) -> Result<mpsc::Sender<Dispatch>> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ConsoleError::HandlerAlreadyRunning);
        }

        let capacity = {
            let mut state = self.state.lock();
            state.start = Instant::now();
            state.config.channel_buffer
        };
        let (tx, rx) = mpsc::channel(capacity);

        let state = Arc::clone(&self.state);
        let failed_writes = Arc::clone(&self.failed_writes);
        let handle = std::thread::Builder::new()
            .name(RENDERER_THREAD.to_string())
            .spawn(move || Self::render_loop(rx, state, failed_writes))
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                ConsoleError::HandlerSpawn(e.to_string())
            })?;

        *self.worker.lock() = Some(handle);
        Ok(tx)
    }

    fn join(&self) {
        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::error!("Console renderer thread panicked");
            }
        }
    }
}
