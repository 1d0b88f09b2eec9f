// Shared helpers for console integration tests

use consolelog::{Console, Level, Logger};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory writer that can be read back while a console owns a clone
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Take everything written so far, leaving the buffer empty
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.lock().unwrap());
        String::from_utf8(bytes).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console writing to a fresh buffer, registered for every level
///
/// The elapsed counter ticks once per hour so every line renders `[0000]`.
pub fn console_logger(color: bool) -> (Logger, Arc<Console>, SharedBuffer) {
    let buffer = SharedBuffer::default();

    let console = Arc::new(Console::new());
    console.set_writer(buffer.clone());
    console.display_color(color);
    console.set_channel_buffer(3);
    console.use_mini_timestamp(true);
    console.set_mini_timestamp_unit(Duration::from_secs(3600));

    let mut logger = Logger::new();
    logger
        .register_handler(console.clone(), &Level::ALL)
        .unwrap();

    (logger, console, buffer)
}

/// Run `f`, which must panic, and return the panic message
#[allow(dead_code)]
pub fn panic_message<F: FnOnce()>(f: F) -> String {
    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).unwrap_err();
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap()
}
