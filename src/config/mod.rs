use crate::color::{ColorCode, RESET};
use crate::error::{ConsoleError, Result};
use crate::level::Level;
use chrono::format::{Item, StrftimeItems};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};
use std::path::Path;
use std::time::Duration;

/// RFC3339 in chrono's strftime syntax
pub const RFC3339: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Largest entry queue tokio's bounded channel accepts
pub const MAX_CHANNEL_BUFFER: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Per-level color codes, indexed by [`Level::ordinal`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, ColorCode>",
    into = "BTreeMap<String, ColorCode>"
)]
pub struct LevelColors([ColorCode; Level::COUNT]);

impl Default for LevelColors {
    fn default() -> Self {
        Self(Level::ALL.map(default_level_color))
    }
}

fn default_level_color(level: Level) -> ColorCode {
    match level {
        Level::Debug => ColorCode::new(Color::Green),
        Level::Info => ColorCode::new(Color::Blue),
        Level::Notice => ColorCode::bold(Color::Cyan),
        Level::Warn => ColorCode::bold(Color::Yellow),
        Level::Error => ColorCode::bold(Color::Red),
        Level::Alert => ColorCode::new(Color::Red).underline(),
        Level::Panic => ColorCode::new(Color::Red),
        Level::Trace => ColorCode::new(Color::White),
    }
}

impl Index<Level> for LevelColors {
    type Output = ColorCode;

    fn index(&self, level: Level) -> &ColorCode {
        &self.0[level.ordinal()]
    }
}

impl IndexMut<Level> for LevelColors {
    fn index_mut(&mut self, level: Level) -> &mut ColorCode {
        &mut self.0[level.ordinal()]
    }
}

impl TryFrom<BTreeMap<String, ColorCode>> for LevelColors {
    type Error = ConsoleError;

    /// Levels missing from the map keep their default color
    fn try_from(map: BTreeMap<String, ColorCode>) -> Result<Self> {
        let mut colors = LevelColors::default();
        for (name, code) in map {
            let level: Level = name.parse()?;
            colors[level] = code;
        }
        Ok(colors)
    }
}

impl From<LevelColors> for BTreeMap<String, ColorCode> {
    fn from(colors: LevelColors) -> Self {
        Level::ALL
            .into_iter()
            .zip(colors.0)
            .map(|(level, code)| (level.name().to_lowercase(), code))
            .collect()
    }
}

/// Rendering settings for the console handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Whether labels and field keys are wrapped in ANSI colors
    #[serde(default = "default_color")]
    pub color: bool,

    /// Color used for each level's label and field keys
    #[serde(default)]
    pub level_colors: LevelColors,

    /// Sequence closing every colored segment
    #[serde(default = "default_ansi_reset")]
    pub ansi_reset: String,

    /// strftime format of the calendar timestamp
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Render a zero-padded elapsed counter instead of a calendar timestamp
    #[serde(default = "default_mini_timestamp")]
    pub mini_timestamp: bool,

    /// Milliseconds per tick of the elapsed counter
    #[serde(default = "default_mini_timestamp_unit_ms")]
    pub mini_timestamp_unit_ms: u64,

    /// Capacity of the entry queue
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,
}

// Default value functions for serde
fn default_color() -> bool {
    true
}

fn default_ansi_reset() -> String {
    RESET.to_string()
}

fn default_timestamp_format() -> String {
    RFC3339.to_string()
}

fn default_mini_timestamp() -> bool {
    true
}

fn default_mini_timestamp_unit_ms() -> u64 {
    1
}

fn default_channel_buffer() -> usize {
    3
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            level_colors: LevelColors::default(),
            ansi_reset: default_ansi_reset(),
            timestamp_format: default_timestamp_format(),
            mini_timestamp: default_mini_timestamp(),
            mini_timestamp_unit_ms: default_mini_timestamp_unit_ms(),
            channel_buffer: default_channel_buffer(),
        }
    }
}

impl ConsoleConfig {
    /// Load a console configuration from a file (supports TOML and JSON)
    pub fn from_file(path: &Path) -> Result<ConsoleConfig> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConsoleError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let config = match extension {
            "toml" => Self::parse_toml(&contents)?,
            "json" => Self::parse_json(&contents)?,
            _ => {
                return Err(ConsoleError::InvalidConfig(format!(
                    "Unsupported file format: {}. Use .toml or .json",
                    extension
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_toml(contents: &str) -> Result<ConsoleConfig> {
        toml::from_str(contents)
            .map_err(|e| ConsoleError::InvalidConfig(format!("Failed to parse TOML: {}", e)))
    }

    fn parse_json(contents: &str) -> Result<ConsoleConfig> {
        serde_json::from_str(contents)
            .map_err(|e| ConsoleError::InvalidConfig(format!("Failed to parse JSON: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.channel_buffer == 0 {
            return Err(ConsoleError::ConfigValidationError(
                "channel_buffer must be at least 1".to_string(),
            ));
        }

        if self.channel_buffer > MAX_CHANNEL_BUFFER {
            return Err(ConsoleError::ConfigValidationError(format!(
                "channel_buffer cannot exceed {}",
                MAX_CHANNEL_BUFFER
            )));
        }

        if self.mini_timestamp_unit_ms == 0 {
            return Err(ConsoleError::ConfigValidationError(
                "mini_timestamp_unit_ms must be at least 1".to_string(),
            ));
        }

        validate_timestamp_format(&self.timestamp_format)
    }

    /// Length of one tick of the elapsed counter
    pub fn mini_timestamp_unit(&self) -> Duration {
        Duration::from_millis(self.mini_timestamp_unit_ms)
    }
}

/// Reject strftime strings chrono cannot render
pub fn validate_timestamp_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConsoleError::ConfigValidationError(format!(
            "Invalid timestamp_format: {}",
            format
        )));
    }
    Ok(())
}
