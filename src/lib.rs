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

//! A logger that writes level-filtered lines to the console and to one file per UTC day.
//!
//! # Overview
//!
//! A [`Logger`] formats every call that passes its minimum level into one line and hands it to
//! its appenders. The [`Console`](append::Console) appender prints it synchronously. The
//! [`RollingFile`](append::RollingFile) appender queues it in a bounded buffer and returns;
//! a dedicated thread writes the queue in batches to `<dir>/YYYY-MM-DD.log`. Under overload the
//! oldest queued lines are dropped, and write failures never reach the caller.
//!
//! # Examples
//!
//! Build the standard logger from the environment and pass it around by reference:
//!
//! ```no_run
//! let logger = dailylog::Logger::from_env().unwrap();
//!
//! dailylog::success!(logger, "server is running", 8080);
//! dailylog::error!(logger, "failed to reach database", "postgres");
//! logger.flush();
//! ```
//!
//! Install it as the `log` crate global logger:
//!
//! ```no_run
//! let config = dailylog::Config::default();
//! let logger = dailylog::Logger::from_config(&config).unwrap().apply().unwrap();
//!
//! log::info!(user = "alice"; "user created");
//! dailylog::success!(logger, "user created");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod config;
pub mod layout;
pub mod trap;

mod bridge;
mod error;
mod level;
mod logger;
mod macros;

pub use self::append::Append;
pub use self::config::Config;
pub use self::error::Error;
pub use self::layout::LogLine;
pub use self::level::Level;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
