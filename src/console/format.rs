// Line layout for console entries

use crate::config::ConsoleConfig;
use crate::entry::Entry;
use std::fmt::Write;
use std::time::Duration;

/// Column width the message is padded to when fields follow it
pub const MESSAGE_WIDTH: usize = 25;

/// Render one entry as a single newline-terminated line
///
/// # Arguments
/// * `entry` - The entry to render
/// * `config` - Current rendering settings
/// * `elapsed` - Time since the renderer started, used in mini-timestamp mode
///
/// Layout: `LABEL[timestamp] message` and, when the entry has fields or a
/// trace duration, the message padded to [`MESSAGE_WIDTH`] followed by
/// ` key=value` for each field.
pub fn format_entry(entry: &Entry, config: &ConsoleConfig, elapsed: Duration) -> String {
    let color = &config.level_colors[entry.level];
    let mut line = String::with_capacity(64 + entry.message.len());

    if config.color {
        line.push_str(&color.paint(entry.level.label(), &config.ansi_reset));
    } else {
        line.push_str(entry.level.label());
    }

    line.push('[');
    if config.mini_timestamp {
        let ticks = elapsed.as_millis() / config.mini_timestamp_unit().as_millis().max(1);
        let _ = write!(line, "{:04}", ticks);
    } else {
        let _ = write!(line, "{}", entry.timestamp.format(&config.timestamp_format));
    }
    line.push(']');

    line.push(' ');
    if entry.fields.is_empty() && entry.duration.is_none() {
        line.push_str(&entry.message);
    } else {
        let _ = write!(line, "{:<width$}", entry.message, width = MESSAGE_WIDTH);

        let duration = entry.duration.map(|d| format!("{:?}", d));
        let fields = entry
            .fields
            .iter()
            .map(|f| (f.key.as_str(), f.value.as_str()))
            .chain(duration.as_deref().map(|d| ("duration", d)));

        for (key, value) in fields {
            line.push(' ');
            if config.color {
                line.push_str(&color.paint(key, &config.ansi_reset));
            } else {
                line.push_str(key);
            }
            line.push('=');
            line.push_str(value);
        }
    }

    line.push('\n');
    line
}
