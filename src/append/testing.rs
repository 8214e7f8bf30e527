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

use std::sync::Arc;
use std::sync::Mutex;

use crate::Error;
use crate::Level;
use crate::append::Append;
use crate::layout::LogLine;

/// An appender that writes lines that can be captured by a test harness (like `cargo test`),
/// and thus the outputs are suppressed unless `--nocapture` or `--show-output` is specified.
///
/// Every line is also kept in memory; clones share the same record.
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
/// dailylog::warn!(logger, "watch out");
/// assert_eq!(testing.lines().len(), 1);
/// assert_eq!(testing.lines()[0].0, Level::Warn);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Testing {
    lines: Arc<Mutex<Vec<(Level, LogLine)>>>,
}

impl Testing {
    /// Return every line appended so far, in order.
    pub fn lines(&self) -> Vec<(Level, LogLine)> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Append for Testing {
    fn append(&self, level: Level, line: &LogLine) -> Result<(), Error> {
        eprintln!("{line}");
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.push((level, line.clone()));
        Ok(())
    }
}
