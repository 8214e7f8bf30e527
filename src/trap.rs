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

//! Traps receive the errors that appenders swallow.

use std::fmt;
use std::io;
use std::io::Write;

use crate::Error;

/// A sink for errors that must not reach the caller of a log method.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error that the appender has already given up on.
    fn trap(&self, err: &Error);
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A trap that drops every error.
///
/// This is the default of the rotating file appender: a failing disk must not feed more lines
/// into the logger that is failing to persist them.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct SilentTrap {}

impl Trap for SilentTrap {
    fn trap(&self, _: &Error) {}
}

/// A trap that writes errors straight to standard error, bypassing the logger.
///
/// If standard error is not available, it does nothing.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct StderrTrap {}

impl Trap for StderrTrap {
    fn trap(&self, err: &Error) {
        let _ = writeln!(io::stderr(), "{err}");
    }
}
