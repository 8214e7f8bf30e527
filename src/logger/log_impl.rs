// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

use jiff::Timestamp;
use serde_json::Value;

use crate::Append;
use crate::Config;
use crate::Error;
use crate::Level;
use crate::LoggerBuilder;
use crate::append::Console;
use crate::append::rolling_file::RollingFileBuilder;
use crate::layout::TextLayout;

/// The logging front-end.
///
/// A logger filters calls against its minimum level, formats each emitted call once with a
/// [`TextLayout`], and hands the line to every configured [`Append`] in order. Errors returned by
/// appenders are ignored: a log call never fails.
///
/// Construct one at startup and pass it by reference, or install it with [`Logger::apply`].
///
/// # Examples
///
/// ```
/// use dailylog::Level;
/// use dailylog::Logger;
/// use dailylog::append::Testing;
///
/// let testing = Testing::default();
/// let logger = Logger::builder().append(testing.clone()).build();
///
/// logger.debug("dropped", &[]);
/// logger.success("server is running", &[]);
/// dailylog::info!(logger, "user created", 42, "alice");
///
/// let lines = testing.lines();
/// assert_eq!(lines.len(), 2);
/// assert!(lines[1].1.as_str().ends_with(r#"[INFO] user created [42,"alice"]"#));
/// ```
#[derive(Debug)]
pub struct Logger {
    min_level: Level,
    layout: TextLayout,
    appends: Vec<Box<dyn Append>>,
}

impl Logger {
    /// Create a new empty [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub(super) fn new(min_level: Level, appends: Vec<Box<dyn Append>>) -> Self {
        Self {
            min_level,
            layout: TextLayout::default(),
            appends,
        }
    }

    /// Create the standard logger described by `config`.
    ///
    /// Lines always go to the [`Console`]. When file logging is enabled, they are also queued to a
    /// [`RollingFile`](crate::append::RollingFile) under the configured directory.
    ///
    /// # Errors
    ///
    /// Return an error if the rolling file writer thread cannot be started.
    pub fn from_config(config: &Config) -> Result<Logger, Error> {
        let mut builder = Logger::builder()
            .min_level(config.min_level)
            .append(Console::default());

        if config.file_logging_enabled {
            builder = builder.append(RollingFileBuilder::from_config(config).build()?);
        }

        Ok(builder.build())
    }

    /// Create the standard logger from the process environment.
    ///
    /// See [`Config::from_env`] for the recognized variables.
    ///
    /// # Errors
    ///
    /// Return an error if a variable holds an invalid value, or if the rolling file writer
    /// thread cannot be started.
    pub fn from_env() -> Result<Logger, Error> {
        Logger::from_config(&Config::from_env()?)
    }

    /// The minimum level of emitted calls.
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Whether a call at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level.passes(self.min_level)
    }

    /// Emit a log call at `level`.
    ///
    /// Below the minimum level this returns before `message` is formatted.
    pub fn log(&self, level: Level, message: impl fmt::Display, args: &[Value]) {
        if !self.enabled(level) {
            return;
        }

        let line = self.layout.format(Timestamp::now(), level, message, args);
        for append in &self.appends {
            let _ = append.append(level, &line);
        }
    }

    /// Emit a log call at [`Level::Debug`].
    pub fn debug(&self, message: impl fmt::Display, args: &[Value]) {
        self.log(Level::Debug, message, args);
    }

    /// Emit a log call at [`Level::Info`].
    pub fn info(&self, message: impl fmt::Display, args: &[Value]) {
        self.log(Level::Info, message, args);
    }

    /// Emit a log call at [`Level::Success`].
    pub fn success(&self, message: impl fmt::Display, args: &[Value]) {
        self.log(Level::Success, message, args);
    }

    /// Emit a log call at [`Level::Warn`].
    pub fn warn(&self, message: impl fmt::Display, args: &[Value]) {
        self.log(Level::Warn, message, args);
    }

    /// Emit a log call at [`Level::Error`].
    pub fn error(&self, message: impl fmt::Display, args: &[Value]) {
        self.log(Level::Error, message, args);
    }

    /// Flush every appender, waiting for queued file lines to be written.
    pub fn flush(&self) {
        for append in &self.appends {
            let _ = append.flush();
        }
    }

    /// Install this logger as the global logger of the `log` crate and return a handle to it.
    ///
    /// The `log` max level is set from the minimum level. The logger lives until the process
    /// exits and is never dropped, so lines still queued at exit are lost unless
    /// [`Logger::flush`] is called first.
    ///
    /// # Errors
    ///
    /// Return an error if a global logger has already been set. The logger is not reclaimed in
    /// that case.
    pub fn apply(self) -> Result<&'static Logger, log::SetLoggerError> {
        let max_level = self.min_level.to_level_filter();
        let logger: &'static Logger = Box::leak(Box::new(self));
        log::set_logger(logger)?;
        log::set_max_level(max_level);
        Ok(logger)
    }
}
