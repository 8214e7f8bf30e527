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

//! Appender persisting lines to one file per UTC day, without blocking the caller.
//!
//! Lines are queued in memory and drained by a dedicated writer thread in batches of
//! [`BATCH_SIZE`]. The queue is bounded: when it is full, the oldest line is dropped to make room
//! for the new one. Each batch goes to `<dir>/YYYY-MM-DD.log`, keyed by the UTC date at the
//! time the batch is written, so lines queued before midnight but written after it land in the
//! new day's file.
//!
//! Persistence is best effort. Write failures are handed to a [`Trap`](crate::trap::Trap) and
//! never reach the caller; lines still queued when the process exits are lost unless the
//! appender is [flushed](crate::append::Append::flush) or dropped first.
//!
//! # Example
//!
//! ```no_run
//! use std::num::NonZeroUsize;
//!
//! use dailylog::Logger;
//! use dailylog::append::RollingFile;
//!
//! let rolling = RollingFile::builder("logs")
//!     .max_queue_size(NonZeroUsize::new(1000).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let logger = Logger::builder().append(rolling).build();
//! dailylog::info!(logger, "This line will be written to logs/<today>.log.");
//! logger.flush();
//! ```

pub use append::RollingFile;
pub use append::RollingFileBuilder;
pub use writer::BatchWriter;
pub use writer::DailyFileWriter;
pub use writer::log_file_path;

mod append;
mod clock;
mod queue;
mod worker;
mod writer;

/// The maximum number of lines written to a file at once.
pub const BATCH_SIZE: usize = 256;
