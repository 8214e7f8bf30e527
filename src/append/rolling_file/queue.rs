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

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::layout::LogLine;

/// A bounded FIFO of formatted lines that drops its oldest line when full.
///
/// Push and eviction happen under one lock, so concurrent producers never interleave.
#[derive(Debug)]
pub(crate) struct BoundedQueue {
    capacity: NonZeroUsize,
    lines: Mutex<VecDeque<LogLine>>,
}

impl BoundedQueue {
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            lines: Mutex::new(VecDeque::with_capacity(capacity.get())),
        }
    }

    fn lines(&self) -> MutexGuard<'_, VecDeque<LogLine>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Enqueue `line`, returning the line evicted to make room for it.
    pub(crate) fn push(&self, line: LogLine) -> Option<LogLine> {
        let mut lines = self.lines();
        let evicted = if lines.len() >= self.capacity.get() {
            lines.pop_front()
        } else {
            None
        };
        lines.push_back(line);
        evicted
    }

    /// Remove up to `max` of the oldest lines, in order.
    pub(crate) fn take_batch(&self, max: usize) -> Vec<LogLine> {
        let mut lines = self.lines();
        let n = max.min(lines.len());
        lines.drain(..n).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.lines().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Vec<LogLine> {
        self.lines().iter().cloned().collect()
    }
}
