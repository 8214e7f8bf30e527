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

use crate::Append;
use crate::Level;
use crate::Logger;

/// A builder for configuring a [`Logger`].
///
/// # Examples
///
/// ```
/// use dailylog::Level;
/// use dailylog::Logger;
/// use dailylog::append::Console;
///
/// let logger = Logger::builder()
///     .min_level(Level::Warn)
///     .append(Console::default())
///     .build();
/// assert!(!logger.enabled(Level::Info));
/// ```
#[must_use = "call `build` to construct a logger instance"]
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    min_level: Level,
    appends: Vec<Box<dyn Append>>,
}

impl LoggerBuilder {
    /// Set the minimum level of emitted calls.
    ///
    /// Default to [`Level::Info`].
    pub fn min_level(mut self, min_level: Level) -> Self {
        self.min_level = min_level;
        self
    }

    /// Add an [`Append`] receiving every emitted line.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.appends.push(append.into());
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        Logger::new(self.min_level, self.appends)
    }
}
