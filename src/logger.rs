//! Timestamped console logging. Everything goes to stderr so that report
//! output on stdout stays machine-readable.

use std::fmt;

/// Name of the environment variable that enables `debug!` output.
pub const DEBUG_ENV: &str = "ROCKET_COP_DEBUG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Debug,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Debug => "DEBUG",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Level::Info => "\x1b[32m",
            Level::Warn => "\x1b[35m",
            Level::Error => "\x1b[31m",
            Level::Debug => "\x1b[36m",
        }
    }

    /// Debug lines are printed only when [`DEBUG_ENV`] is set.
    pub fn enabled(self) -> bool {
        self != Level::Debug || std::env::var_os(DEBUG_ENV).is_some()
    }
}

/// One log line, colored tag first: `[WARN] [12:00:00] message`.
pub fn format_line(level: Level, time: impl fmt::Display, message: impl fmt::Display) -> String {
    format!("{}[{}] [{}]\x1b[0m {}", level.color(), level.tag(), time, message)
}

pub fn emit(level: Level, message: fmt::Arguments<'_>) {
    if level.enabled() {
        eprintln!("{}", format_line(level, chrono::Utc::now().format("%H:%M:%S"), message));
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::logger::emit($crate::logger::Level::Info, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::logger::emit($crate::logger::Level::Warn, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::logger::emit($crate::logger::Level::Error, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::logger::emit($crate::logger::Level::Debug, format_args!($($arg)*)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_carries_tag_time_and_message() {
        let line = format_line(Level::Warn, "12:34:56", format_args!("Lt == {}", 0));
        assert_eq!(line, "\x1b[35m[WARN] [12:34:56]\x1b[0m Lt == 0");
    }

    #[test]
    fn every_level_has_its_own_tag() {
        for (level, tag) in [
            (Level::Info, "[INFO]"),
            (Level::Warn, "[WARN]"),
            (Level::Error, "[ERROR]"),
            (Level::Debug, "[DEBUG]"),
        ] {
            assert!(format_line(level, "t", "m").contains(tag));
        }
    }

    #[test]
    fn non_debug_levels_always_print() {
        assert!(Level::Info.enabled());
        assert!(Level::Warn.enabled());
        assert!(Level::Error.enabled());
    }
}
