use chrono::Local;
use colored::*;
use std::str::FromStr;

use crate::constants::LOG_LEVEL_ENV;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}

impl LogLevel {
    /// Nivel tomado de `FOODDASH_LOG`, `Info` si no está o no se entiende.
    pub fn from_env() -> Self {
        std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(LogLevel::Info)
    }
}

#[derive(Debug, Clone)]
pub struct Logger {
    pub name: String,
    pub info_color: Color,
    pub level: LogLevel,
}

impl Logger {
    pub fn new(name: impl Into<String>, info_color: Color) -> Self {
        Self {
            name: name.into().to_uppercase(),
            info_color,
            level: LogLevel::from_env(),
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    fn timestamp() -> String {
        Local::now().format("%H:%M:%S").to_string()
    }

    fn header(&self, tag: &str) -> String {
        format!("[{}][{}][{}]", Self::timestamp(), tag, self.name)
    }

    pub fn debug(&self, msg: impl AsRef<str>) {
        if self.enabled(LogLevel::Debug) {
            println!(
                "{} {} {}",
                self.header("DEBUG").dimmed(),
                "→".dimmed(),
                msg.as_ref().dimmed()
            );
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.enabled(LogLevel::Info) {
            println!(
                "{} {} {}",
                self.header("INFO").bold().color(self.info_color),
                "→".dimmed(),
                msg.as_ref()
            );
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.enabled(LogLevel::Warn) {
            println!(
                "{} {} {}",
                self.header("WARN").bold().yellow(),
                "→".dimmed(),
                msg.as_ref()
            );
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        eprintln!(
            "{} {} {}",
            self.header("ERROR").bold().bright_red(),
            "→".dimmed(),
            msg.as_ref()
        );
    }
}
