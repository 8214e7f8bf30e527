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

//! Settings read once when the logger is constructed.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::Error;
use crate::Level;

/// Environment variable for [`Config::log_directory`].
pub const LOG_DIR_ENV: &str = "LOG_DIR";
/// Environment variable for [`Config::file_logging_enabled`].
pub const LOG_TO_FILE_ENV: &str = "LOG_TO_FILE";
/// Environment variable for [`Config::max_queue_size`].
pub const LOG_MAX_QUEUE_ENV: &str = "LOG_MAX_QUEUE";
/// Environment variable for [`Config::sync_flush`].
pub const LOG_SYNC_FLUSH_ENV: &str = "LOG_SYNC_FLUSH";
/// Environment variable for [`Config::min_level`].
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

const DEFAULT_LOG_DIRECTORY: &str = "./logs";
pub(crate) const DEFAULT_MAX_QUEUE_SIZE: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// Logger and appender settings.
///
/// # Examples
///
/// ```
/// use dailylog::Config;
/// use dailylog::Level;
///
/// let config = Config::default();
/// assert_eq!(config.min_level, Level::Info);
/// assert_eq!(config.max_queue_size.get(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base directory for the dated log files. Default to `./logs`.
    pub log_directory: PathBuf,
    /// Whether lines are persisted at all. Default to `true`.
    pub file_logging_enabled: bool,
    /// Queue capacity; the oldest line is dropped beyond it. Default to 1000.
    pub max_queue_size: NonZeroUsize,
    /// Whether appending waits for the triggered flush. Default to `false`.
    pub sync_flush: bool,
    /// Calls below this level are discarded. Default to [`Level::Info`].
    pub min_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            file_logging_enabled: true,
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
            sync_flush: false,
            min_level: Level::default(),
        }
    }
}

impl Config {
    /// Read the settings from the process environment.
    ///
    /// Unset or blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Return an error if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Config, Error> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the settings through an arbitrary key lookup.
    ///
    /// The keys are the `*_ENV` constants of this module.
    ///
    /// # Errors
    ///
    /// Return an error if a non-blank value cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dailylog::Config;
    /// use dailylog::Level;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "LOG_LEVEL" => Some("warn".to_string()),
    ///     "LOG_MAX_QUEUE" => Some("64".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.min_level, Level::Warn);
    /// assert_eq!(config.max_queue_size.get(), 64);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // set but blank means unset
        let value_of = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = value_of(LOG_DIR_ENV) {
            config.log_directory = PathBuf::from(dir);
        }
        if let Some(value) = value_of(LOG_TO_FILE_ENV) {
            config.file_logging_enabled = parse_bool(LOG_TO_FILE_ENV, &value)?;
        }
        if let Some(value) = value_of(LOG_MAX_QUEUE_ENV) {
            config.max_queue_size = value.trim().parse().map_err(|err| {
                invalid_value(LOG_MAX_QUEUE_ENV, &value).with_source(err)
            })?;
        }
        if let Some(value) = value_of(LOG_SYNC_FLUSH_ENV) {
            config.sync_flush = parse_bool(LOG_SYNC_FLUSH_ENV, &value)?;
        }
        if let Some(value) = value_of(LOG_LEVEL_ENV) {
            config.min_level = value
                .parse()
                .map_err(|err| invalid_value(LOG_LEVEL_ENV, &value).with_source(err))?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid_value(key, value)),
    }
}

fn invalid_value(key: &'static str, value: &str) -> Error {
    Error::new("invalid logging configuration")
        .with_context("key", key)
        .with_context("value", value)
}
