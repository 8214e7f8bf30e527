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

use std::io;
use std::io::Write;

use crate::Error;
use crate::Level;
use crate::append::Append;
use crate::layout::LogLine;

/// An appender that prints lines to the console, synchronously.
///
/// `debug`, `info` and `success` lines go to stdout; `warn` and `error` lines go to stderr.
///
/// With the `colored` feature enabled, lines are tinted by level unless
/// [`no_color`](Console::no_color) is set.
///
/// # Examples
///
/// ```
/// use dailylog::append::Console;
///
/// let console = Console::default();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Console {
    no_color: bool,
}

impl Console {
    /// Disable colored output.
    ///
    /// No effect without the `colored` feature.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    fn render(&self, level: Level, line: &LogLine) -> String {
        #[cfg(feature = "colored")]
        if !self.no_color {
            use colored::Color;
            use colored::Colorize;

            let color = match level {
                Level::Debug => Color::Blue,
                Level::Info => Color::Cyan,
                Level::Success => Color::Green,
                Level::Warn => Color::Yellow,
                Level::Error => Color::Red,
            };
            return format!("{}\n", line.as_str().color(color));
        }

        #[cfg(not(feature = "colored"))]
        let _ = (level, self.no_color);
        format!("{line}\n")
    }
}

impl Append for Console {
    fn append(&self, level: Level, line: &LogLine) -> Result<(), Error> {
        let text = self.render(level, line);
        match level {
            Level::Debug | Level::Info | Level::Success => io::stdout().write_all(text.as_bytes()),
            Level::Warn | Level::Error => io::stderr().write_all(text.as_bytes()),
        }
        .map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        io::stdout().flush().map_err(Error::from_io_error)?;
        io::stderr().flush().map_err(Error::from_io_error)
    }
}
