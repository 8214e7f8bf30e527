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
use std::str::FromStr;

use crate::Error;

/// The severity of a log call.
///
/// `Success` shares its severity with `Info` for filtering, but keeps its own glyph and tag.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub enum Level {
    /// Diagnostic detail, severity 0.
    Debug,
    /// Normal operation, severity 1.
    #[default]
    Info,
    /// A completed operation, severity 1.
    Success,
    /// Something unexpected but recoverable, severity 2.
    Warn,
    /// A failed operation, severity 3.
    Error,
}

impl Level {
    /// All levels, in ascending severity.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Success,
        Level::Warn,
        Level::Error,
    ];

    /// The ordinal used for filtering.
    pub const fn severity(self) -> u8 {
        match self {
            Level::Debug => 0,
            Level::Info | Level::Success => 1,
            Level::Warn => 2,
            Level::Error => 3,
        }
    }

    /// Whether a call at this level passes the `min` threshold.
    pub const fn passes(self, min: Level) -> bool {
        self.severity() >= min.severity()
    }

    /// The lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Success => "success",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// The uppercased tag printed in every line.
    pub const fn tag(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// The fixed glyph printed before the tag.
    pub const fn glyph(self) -> &'static str {
        match self {
            Level::Debug => "🐛",
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warn => "⚠️",
            Level::Error => "❌",
        }
    }

    /// The closest [`log::LevelFilter`] admitting this level and everything above it.
    pub const fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Level::Debug => log::LevelFilter::Trace,
            Level::Info | Level::Success => log::LevelFilter::Info,
            Level::Warn => log::LevelFilter::Warn,
            Level::Error => log::LevelFilter::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::new("unknown log level").with_context("level", s))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}
