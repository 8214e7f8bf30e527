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

/// Emit a log call at a given level through a [`Logger`](crate::Logger).
///
/// The first argument is a `Logger` or a reference to one. Supplementary arguments may be any
/// [`serde::Serialize`] value; they are converted with [`to_value`](crate::layout::to_value)
/// only when the call passes the minimum level.
///
/// # Examples
///
/// ```
/// use dailylog::Level;
/// use dailylog::Logger;
///
/// let logger = Logger::builder().build();
/// dailylog::log!(logger, Level::Info, "listening", "0.0.0.0", 8080);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $message:expr $(, $arg:expr)* $(,)?) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::Level = $level;
        if logger.enabled(level) {
            logger.log(level, $message, &[$($crate::layout::to_value(&$arg)),*]);
        }
    }};
}

/// Emit a log call at [`Level::Debug`](crate::Level::Debug). See [`log!`](crate::log!).
#[macro_export]
macro_rules! debug {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Debug, $message $(, $arg)*)
    };
}

/// Emit a log call at [`Level::Info`](crate::Level::Info). See [`log!`](crate::log!).
#[macro_export]
macro_rules! info {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Info, $message $(, $arg)*)
    };
}

/// Emit a log call at [`Level::Success`](crate::Level::Success). See [`log!`](crate::log!).
#[macro_export]
macro_rules! success {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Success, $message $(, $arg)*)
    };
}

/// Emit a log call at [`Level::Warn`](crate::Level::Warn). See [`log!`](crate::log!).
#[macro_export]
macro_rules! warn {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Warn, $message $(, $arg)*)
    };
}

/// Emit a log call at [`Level::Error`](crate::Level::Error). See [`log!`](crate::log!).
#[macro_export]
macro_rules! error {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Error, $message $(, $arg)*)
    };
}
