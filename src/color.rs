// ANSI color codes used to decorate level labels and field keys

use crate::error::ConsoleError;
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default sequence closing every colored segment
pub const RESET: &str = "\x1b[0m";

/// ANSI start sequence for a level's color
///
/// Codes are built from a [`colored::Color`] with optional bold and
/// underline attributes, so `ColorCode::bold(Color::Cyan)` renders as
/// `ESC[36;1m` and `ColorCode::new(Color::Red).underline()` as
/// `ESC[31mESC[4m`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorCode(String);

impl ColorCode {
    /// Plain foreground color
    pub fn new(color: Color) -> Self {
        Self(format!("\x1b[{}m", color.to_fg_str()))
    }

    /// Bold foreground color
    pub fn bold(color: Color) -> Self {
        Self(format!("\x1b[{};1m", color.to_fg_str()))
    }

    /// Append an underline attribute
    pub fn underline(mut self) -> Self {
        self.0.push_str("\x1b[4m");
        self
    }

    /// Use an escape sequence verbatim
    pub fn raw(sequence: impl Into<String>) -> Self {
        Self(sequence.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap `text` in this color and `reset`
    pub fn paint(&self, text: &str, reset: &str) -> String {
        let mut out = String::with_capacity(self.0.len() + text.len() + reset.len());
        out.push_str(&self.0);
        out.push_str(text);
        out.push_str(reset);
        out
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ColorCode {
    type Err = ConsoleError;

    /// Parse `name[+bold][+underline]`, e.g. `cyan+bold`, or a raw escape
    /// sequence starting with ESC
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('\x1b') {
            return Ok(Self::raw(s));
        }

        let mut parts = s.split('+').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let color =
            Color::from_str(name).map_err(|_| ConsoleError::UnknownColor(s.to_string()))?;

        let mut bold = false;
        let mut underline = false;
        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "bold" => bold = true,
                "underline" => underline = true,
                _ => return Err(ConsoleError::UnknownColor(s.to_string())),
            }
        }

        let code = if bold {
            Self::bold(color)
        } else {
            Self::new(color)
        };
        Ok(if underline { code.underline() } else { code })
    }
}

impl TryFrom<String> for ColorCode {
    type Error = ConsoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorCode> for String {
    fn from(code: ColorCode) -> Self {
        code.0
    }
}
