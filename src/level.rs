// Log levels and their fixed-width labels

use crate::error::ConsoleError;
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry
///
/// The discriminant is the level's ordinal and indexes per-level tables such
/// as [`LevelColors`](crate::config::LevelColors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug = 0,
    Info,
    Notice,
    Warn,
    Error,
    Alert,
    Panic,
    Trace,
}

impl Level {
    /// Number of levels
    pub const COUNT: usize = 8;

    /// Every level, in ordinal order
    pub const ALL: [Level; Level::COUNT] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warn,
        Level::Error,
        Level::Alert,
        Level::Panic,
        Level::Trace,
    ];

    /// Width of every rendered level label
    pub const LABEL_WIDTH: usize = 6;

    /// Position of this level in [`Level::ALL`]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Canonical upper-case name
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Notice => "NOTICE",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Alert => "ALERT",
            Level::Panic => "PANIC",
            Level::Trace => "TRACE",
        }
    }

    /// Name right-aligned in [`Level::LABEL_WIDTH`] columns
    pub fn label(self) -> &'static str {
        match self {
            Level::Debug => " DEBUG",
            Level::Info => "  INFO",
            Level::Notice => "NOTICE",
            Level::Warn => "  WARN",
            Level::Error => " ERROR",
            Level::Alert => " ALERT",
            Level::Panic => " PANIC",
            Level::Trace => " TRACE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConsoleError::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_fixed_width() {
        for level in Level::ALL {
            assert_eq!(level.label().len(), Level::LABEL_WIDTH, "{level}");
            assert_eq!(level.label().trim_start(), level.name());
        }
    }

    #[test]
    fn test_ordinals_match_all() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.ordinal(), i);
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("NOTICE".parse::<Level>().unwrap(), Level::Notice);
        assert_eq!(" Warn ".parse::<Level>().unwrap(), Level::Warn);
        assert!(matches!(
            "fatal".parse::<Level>(),
            Err(ConsoleError::UnknownLevel(_))
        ));
    }
}
