//! Console log handler
//!
//! Renders structured log entries as aligned, optionally colored text lines.
//! A [`Logger`] routes entries through a bounded queue to each registered
//! [`Handler`]; the [`Console`] handler formats them on a dedicated thread.
//!
//! ```no_run
//! use consolelog::{Console, Level, Logger, F};
//! use std::sync::Arc;
//!
//! let console = Arc::new(Console::new());
//! console.display_color(false);
//!
//! let mut logger = Logger::new();
//! logger.register_handler(console.clone(), &Level::ALL).unwrap();
//!
//! logger.info("listening");
//! logger.with_fields(vec![F("port", 8080)]).notice("bound");
//! ```

pub mod color;
pub mod config;
pub mod console;
pub mod entry;
pub mod error;
pub mod level;
pub mod logger;

pub use color::ColorCode;
pub use config::ConsoleConfig;
pub use console::Console;
pub use entry::{Entry, Field, F};
pub use error::{ConsoleError, Result};
pub use level::Level;
pub use logger::{EntryBuilder, Handler, Logger, TraceSpan};
