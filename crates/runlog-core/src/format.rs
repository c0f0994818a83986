//! Log records and the line formats that render them

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Timestamp layout shared by every preset
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Rendered in place of source fields the record does not carry
const UNKNOWN: &str = "?";

/// A single log event, as handed to handlers
///
/// Source fields are optional: the `log_*!` macros capture module path and
/// line, while plain method calls leave all three unset.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Event time
    pub timestamp: DateTime<Local>,
    /// Name of the logger that produced the record
    pub logger: &'a str,
    /// Severity of the event
    pub level: Level,
    /// Module path of the call site, when captured
    pub module: Option<&'a str>,
    /// Function name of the call site, when supplied
    pub function: Option<&'a str>,
    /// Source line of the call site, when captured
    pub line: Option<u32>,
    /// The message body
    pub message: &'a str,
}

impl<'a> Record<'a> {
    /// Build a record with the current time and no source information
    pub fn new(logger: &'a str, level: Level, message: &'a str) -> Self {
        Self {
            timestamp: Local::now(),
            logger,
            level,
            module: None,
            function: None,
            line: None,
            message,
        }
    }
}

/// Named line-format presets
///
/// Each preset is an ordered composition of record fields, in plain or
/// bracketed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// `<timestamp> - LEVEL - message`
    Basic,
    /// `<timestamp> - logger - LEVEL - message`
    LoggerName,
    /// `<timestamp> - [logger][LEVEL]: message`
    LoggerNameBrackets,
    /// `<timestamp> [LEVEL][function]: message`
    FuncName,
    /// `<timestamp> [LEVEL][module][function]: message`
    ModuleFuncName,
    /// `<timestamp> [LEVEL][module:line]: message`
    ModuleLine,
}

impl Default for Format {
    fn default() -> Self {
        Format::Basic
    }
}

impl Format {
    /// Render a record into one output line, without a trailing newline
    pub fn render(&self, record: &Record<'_>) -> String {
        let ts = record.timestamp.format(TIMESTAMP_FORMAT);
        let module = record.module.unwrap_or(UNKNOWN);
        let function = record.function.unwrap_or(UNKNOWN);
        match self {
            Format::Basic => {
                format!("{} - {} - {}", ts, record.level, record.message)
            }
            Format::LoggerName => {
                format!(
                    "{} - {} - {} - {}",
                    ts, record.logger, record.level, record.message
                )
            }
            Format::LoggerNameBrackets => {
                format!(
                    "{} - [{}][{}]: {}",
                    ts, record.logger, record.level, record.message
                )
            }
            Format::FuncName => {
                format!("{} [{}][{}]: {}", ts, record.level, function, record.message)
            }
            Format::ModuleFuncName => {
                format!(
                    "{} [{}][{}][{}]: {}",
                    ts, record.level, module, function, record.message
                )
            }
            Format::ModuleLine => match record.line {
                Some(line) => format!(
                    "{} [{}][{}:{}]: {}",
                    ts, record.level, module, line, record.message
                ),
                None => format!(
                    "{} [{}][{}:{}]: {}",
                    ts, record.level, module, UNKNOWN, record.message
                ),
            },
        }
    }
}
