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

//! Formatting of log calls into single text lines.

use std::fmt;
use std::fmt::Write;

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;

use crate::Level;

/// A formatted log line.
///
/// Produced once by a [`TextLayout`] and never mutated. It carries no line terminator; appenders
/// add one when they persist it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LogLine(Box<str>);

impl LogLine {
    /// The text of the line.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The length of the line in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for LogLine {
    fn from(line: String) -> Self {
        LogLine(line.into_boxed_str())
    }
}

impl From<&str> for LogLine {
    fn from(line: &str) -> Self {
        LogLine(line.into())
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// A layout that formats a log call as one line of text.
///
/// Output format:
///
/// ```text
/// [2024-08-11T14:44:57.172Z] ❌ [ERROR] failed to reach database ["postgres",5432]
/// [2024-08-11T14:44:57.172Z] ⚠️ [WARN] slow request
/// [2024-08-11T14:44:57.172Z] ✅ [SUCCESS] server is running
/// [2024-08-11T14:44:57.172Z] ℹ️ [INFO] user created {"id":42}
/// [2024-08-11T14:44:57.172Z] 🐛 [DEBUG] cache miss
/// ```
///
/// Timestamps are ISO 8601 in UTC with millisecond precision. Supplementary arguments, if any,
/// are appended as one JSON array. Line breaks inside the message are escaped, so a formatted
/// line never spans more than one line.
///
/// # Examples
///
/// ```
/// use dailylog::Level;
/// use dailylog::layout::TextLayout;
///
/// let ts = "2024-08-11T14:44:57.172Z".parse().unwrap();
/// let line = TextLayout::default().format(ts, Level::Warn, "disk almost full", &[]);
/// assert_eq!(line.as_str(), "[2024-08-11T14:44:57.172Z] ⚠️ [WARN] disk almost full");
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct TextLayout {}

impl TextLayout {
    /// Format a log call that happened at `time`.
    pub fn format(
        &self,
        time: Timestamp,
        level: Level,
        message: impl fmt::Display,
        args: &[Value],
    ) -> LogLine {
        let mut text = format!("[{time:.3}] {} [{}] ", level.glyph(), level.tag());

        let mut writer = EscapeLineBreaks(&mut text);
        // SAFETY: write to a string always succeeds
        write!(&mut writer, "{message}").unwrap();

        if !args.is_empty() {
            text.push(' ');
            text.push_str(&serialize_args(args));
        }

        LogLine::from(text)
    }
}

fn serialize_args(args: &[Value]) -> String {
    // serializing a `Value` only fails for non-string map keys, which `Value` cannot hold
    serde_json::to_string(args).unwrap_or_else(|err| format!("[\"<unserializable: {err}>\"]"))
}

/// Convert a supplementary argument to JSON.
///
/// A value that cannot be represented in JSON degrades to a string describing the failure,
/// so a log call never fails because of its arguments.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use dailylog::layout::to_value;
///
/// assert_eq!(to_value(&42), serde_json::json!(42));
///
/// // maps with non-string keys are not representable in JSON
/// let map = HashMap::from([((1, 2), "pair")]);
/// assert!(to_value(&map).as_str().unwrap().starts_with("<unserializable"));
/// ```
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|err| Value::String(format!("<unserializable: {err}>")))
}

struct EscapeLineBreaks<'a>(&'a mut String);

impl Write for EscapeLineBreaks<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            match c {
                '\n' => self.0.push_str("\\n"),
                '\r' => self.0.push_str("\\r"),
                c => self.0.push(c),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ts() -> Timestamp {
        "2024-08-10T23:59:59.5Z".parse().unwrap()
    }

    #[test]
    fn test_format_without_args() {
        let line = TextLayout::default().format(ts(), Level::Success, "server is running", &[]);
        assert_eq!(
            line.as_str(),
            "[2024-08-10T23:59:59.500Z] ✅ [SUCCESS] server is running"
        );
    }

    #[test]
    fn test_format_with_args() {
        let args = [json!("postgres"), json!(5432), json!({"retry": true})];
        let line = TextLayout::default().format(ts(), Level::Error, "connect failed", &args);
        assert_eq!(
            line.as_str(),
            r#"[2024-08-10T23:59:59.500Z] ❌ [ERROR] connect failed ["postgres",5432,{"retry":true}]"#
        );
    }

    #[test]
    fn test_every_level_has_its_tag() {
        for level in Level::ALL {
            let line = TextLayout::default().format(ts(), level, "m", &[]);
            let expected = format!("{} [{}] m", level.glyph(), level.tag());
            assert!(line.as_str().ends_with(&expected), "{line:?}");
        }
    }

    #[test]
    fn test_line_breaks_are_escaped() {
        let args = [json!("a\nb")];
        let line = TextLayout::default().format(ts(), Level::Info, "first\r\nsecond", &args);
        assert!(!line.as_str().contains('\n'));
        assert!(!line.as_str().contains('\r'));
        assert!(line.as_str().ends_with(r#"first\r\nsecond ["a\nb"]"#));
    }

    #[test]
    fn test_unserializable_argument_degrades() {
        #[derive(Debug)]
        struct Unserializable;

        impl Serialize for Unserializable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("no way"))
            }
        }

        let value = to_value(&Unserializable);
        assert_eq!(value, json!("<unserializable: no way>"));
    }
}
