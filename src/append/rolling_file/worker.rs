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

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;

use crate::append::rolling_file::BATCH_SIZE;
use crate::append::rolling_file::BatchWriter;
use crate::append::rolling_file::clock::Clock;
use crate::append::rolling_file::queue::BoundedQueue;
use crate::trap::Trap;

#[derive(Debug)]
pub(crate) enum Message {
    /// Lines were queued.
    Wake,
    /// Drain the queue, then signal the sender.
    Flush(Sender<()>),
}

/// The single consumer of a [`BoundedQueue`].
///
/// Only this worker drains the queue, so at most one flush is in flight per appender.
pub(crate) struct Worker<W: BatchWriter> {
    queue: Arc<BoundedQueue>,
    writer: W,
    clock: Clock,
    trap: Box<dyn Trap>,
    receiver: Receiver<Message>,
}

impl<W: BatchWriter> Worker<W> {
    pub(crate) fn new(
        queue: Arc<BoundedQueue>,
        writer: W,
        clock: Clock,
        trap: Box<dyn Trap>,
        receiver: Receiver<Message>,
    ) -> Self {
        Self {
            queue,
            writer,
            clock,
            trap,
            receiver,
        }
    }

    pub(crate) fn run(mut self) {
        while let Ok(message) = self.receiver.recv() {
            self.drain();
            if let Message::Flush(done) = message {
                let _ = done.send(());
            }
        }

        // every sender is gone; persist what is left before exiting
        self.drain();
    }

    /// Write queued lines in batches until the queue is empty or a step fails.
    ///
    /// A failure is trapped and ends this drain. Lines of a failed batch are not requeued.
    pub(crate) fn drain(&mut self) {
        while !self.queue.is_empty() {
            let now = self.clock.now();

            if let Err(err) = self.writer.prepare(now) {
                self.trap.trap(&err);
                return;
            }

            let batch = self.queue.take_batch(BATCH_SIZE);
            let mut buf = Vec::with_capacity(batch.iter().map(|line| line.len() + 1).sum());
            for line in &batch {
                buf.extend_from_slice(line.as_str().as_bytes());
                buf.push(b'\n');
            }

            if let Err(err) = self.writer.write_batch(now, &buf) {
                self.trap.trap(&err);
                return;
            }
        }
    }
}
