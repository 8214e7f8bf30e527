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

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Sender;

use crate::Config;
use crate::Error;
use crate::Level;
use crate::append::Append;
use crate::append::rolling_file::BatchWriter;
use crate::append::rolling_file::DailyFileWriter;
use crate::append::rolling_file::clock::Clock;
use crate::append::rolling_file::queue::BoundedQueue;
use crate::append::rolling_file::worker::Message;
use crate::append::rolling_file::worker::Worker;
use crate::config::DEFAULT_MAX_QUEUE_SIZE;
use crate::layout::LogLine;
use crate::trap::SilentTrap;
use crate::trap::Trap;

/// A builder to configure and create a [`RollingFile`] appender.
#[derive(Debug)]
pub struct RollingFileBuilder<W: BatchWriter = DailyFileWriter> {
    thread_name: String,
    writer: W,
    max_queue_size: NonZeroUsize,
    sync_flush: bool,
    trap: Box<dyn Trap>,
    clock: Clock,
}

impl RollingFileBuilder<DailyFileWriter> {
    /// Create a new builder writing dated files under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            thread_name: "dailylog-rolling-file".to_string(),
            writer: DailyFileWriter::new(dir),
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
            sync_flush: false,
            trap: Box::new(SilentTrap::default()),
            clock: Clock::DefaultClock,
        }
    }

    /// Create a new builder from the directory, queue and flush settings of `config`.
    ///
    /// [`Config::file_logging_enabled`] is not consulted here; callers decide whether to build
    /// the appender at all.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.log_directory.clone())
            .max_queue_size(config.max_queue_size)
            .sync_flush(config.sync_flush)
    }
}

impl<W: BatchWriter> RollingFileBuilder<W> {
    /// Replace the persistence step.
    ///
    /// Default to a [`DailyFileWriter`] on the directory given to [`RollingFileBuilder::new`].
    pub fn writer<T: BatchWriter>(self, writer: T) -> RollingFileBuilder<T> {
        RollingFileBuilder {
            thread_name: self.thread_name,
            writer,
            max_queue_size: self.max_queue_size,
            sync_flush: self.sync_flush,
            trap: self.trap,
            clock: self.clock,
        }
    }

    /// Set the name of the writer thread.
    pub fn thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// Set the capacity of the queue. Beyond it, the oldest queued line is dropped.
    ///
    /// Default to 1000.
    pub fn max_queue_size(mut self, n: NonZeroUsize) -> Self {
        self.max_queue_size = n;
        self
    }

    /// Make [`append`](Append::append) wait until the queue holding the new line is drained.
    ///
    /// Default to `false`.
    pub fn sync_flush(mut self, sync_flush: bool) -> Self {
        self.sync_flush = sync_flush;
        self
    }

    /// Set the trap receiving write failures.
    ///
    /// Default to [`SilentTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    #[cfg(test)]
    fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the [`RollingFile`] appender and start its writer thread.
    ///
    /// # Errors
    ///
    /// Return an error if the writer thread cannot be spawned.
    pub fn build(self) -> Result<RollingFile, Error> {
        let Self {
            thread_name,
            writer,
            max_queue_size,
            sync_flush,
            trap,
            clock,
        } = self;

        let queue = Arc::new(BoundedQueue::new(max_queue_size));

        // a pending wake covers every line queued before the worker picks it up
        let (sender, receiver) = crossbeam_channel::bounded(1);

        let worker = Worker::new(queue.clone(), writer, clock, trap, receiver);
        let handle = std::thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || worker.run())
            .map_err(|err| {
                Error::new("failed to spawn rolling file writer thread")
                    .with_context("thread", thread_name)
                    .with_source(err)
            })?;

        Ok(RollingFile {
            queue,
            sync_flush,
            state: WorkerState(Some(State { sender, handle })),
        })
    }
}

/// An appender that persists lines to one file per UTC day from a background thread.
///
/// See the [module documentation](crate::append::rolling_file) for the delivery guarantees.
#[derive(Debug)]
pub struct RollingFile {
    queue: Arc<BoundedQueue>,
    sync_flush: bool,
    state: WorkerState,
}

impl RollingFile {
    /// Create a new [`RollingFileBuilder`] writing dated files under `dir`.
    pub fn builder(dir: impl Into<PathBuf>) -> RollingFileBuilder {
        RollingFileBuilder::new(dir)
    }

    /// The number of lines waiting to be written.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn sender(&self) -> &Sender<Message> {
        // SAFETY: state is always Some before dropped.
        &self.state.0.as_ref().unwrap().sender
    }

    fn wake(&self) {
        // a full channel already holds a wake
        let _ = self.sender().try_send(Message::Wake);
    }

    fn flush_and_wait(&self) {
        let (done, wait) = crossbeam_channel::bounded(1);
        if self.sender().send(Message::Flush(done)).is_ok() {
            // a disconnect means the worker is gone; nothing left to wait for
            let _ = wait.recv();
        }
    }
}

impl Append for RollingFile {
    fn append(&self, _: Level, line: &LogLine) -> Result<(), Error> {
        self.queue.push(line.clone());
        if self.sync_flush {
            self.flush_and_wait();
        } else {
            self.wake();
        }
        Ok(())
    }

    /// Block until every line queued before this call is written or given up on.
    fn flush(&self) -> Result<(), Error> {
        self.flush_and_wait();
        Ok(())
    }
}

#[derive(Debug)]
struct WorkerState(Option<State>);

#[derive(Debug)]
struct State {
    sender: Sender<Message>,
    handle: JoinHandle<()>,
}

impl Drop for WorkerState {
    fn drop(&mut self) {
        // SAFETY: state is always Some before dropped.
        let State { sender, handle } = self.0.take().unwrap();

        // drop our sender, the worker drains the queue and exits its loop
        drop(sender);

        // a panicked writer has nothing left to flush
        let _ = handle.join();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Mutex;
    use std::time::Duration;

    use crossbeam_channel::Receiver;
    use jiff::Timestamp;
    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use super::*;
    use crate::append::rolling_file::clock::ManualClock;

    /// Blocks in every batch until the gate opens, reporting each entry.
    #[derive(Debug)]
    struct GatedWriter {
        entered: Sender<()>,
        gate: Receiver<()>,
        batches: Arc<Mutex<Vec<String>>>,
    }

    impl BatchWriter for GatedWriter {
        fn write_batch(&mut self, _: Timestamp, batch: &[u8]) -> Result<(), Error> {
            let _ = self.entered.send(());
            let _ = self.gate.recv();
            let batch = String::from_utf8(batch.to_vec()).unwrap();
            self.batches.lock().unwrap().push(batch);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct SlowWriter {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl BatchWriter for SlowWriter {
        fn write_batch(&mut self, _: Timestamp, batch: &[u8]) -> Result<(), Error> {
            std::thread::sleep(Duration::from_millis(20));
            let batch = String::from_utf8(batch.to_vec()).unwrap();
            self.events
                .lock()
                .unwrap()
                .push(format!("wrote {}", batch.trim_end()));
            Ok(())
        }
    }

    #[derive(Debug)]
    struct FailingWriter;

    impl BatchWriter for FailingWriter {
        fn write_batch(&mut self, _: Timestamp, _: &[u8]) -> Result<(), Error> {
            Err(Error::new("disk unavailable"))
        }
    }

    fn queue_size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn append_text(rolling: &RollingFile, text: &str) {
        rolling
            .append(Level::Info, &LogLine::from(text))
            .expect("append never fails");
    }

    fn generate_random_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(50..=100);
        std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect()
    }

    #[test]
    fn test_drop_oldest_while_flush_is_suspended() {
        let (entered, entered_rx) = crossbeam_channel::unbounded();
        let (gate_tx, gate) = crossbeam_channel::unbounded();
        let batches = Arc::new(Mutex::new(vec![]));

        let rolling = RollingFile::builder("unused")
            .writer(GatedWriter {
                entered,
                gate,
                batches: batches.clone(),
            })
            .max_queue_size(queue_size(3))
            .build()
            .unwrap();

        // park the worker inside a write
        append_text(&rolling, "warmup");
        entered_rx.recv().unwrap();

        for text in ["a", "b", "c", "d"] {
            append_text(&rolling, text);
        }
        let queued = rolling.queue.snapshot();
        let queued = queued.iter().map(LogLine::as_str).collect::<Vec<_>>();
        assert_eq!(queued, ["b", "c", "d"]);

        drop(gate_tx);
        rolling.flush().unwrap();

        assert_eq!(*batches.lock().unwrap(), ["warmup\n", "b\nc\nd\n"]);
        assert_eq!(rolling.queued(), 0);
    }

    #[test]
    fn test_sync_flush_returns_after_write() {
        let events = Arc::new(Mutex::new(vec![]));
        let rolling = RollingFile::builder("unused")
            .writer(SlowWriter {
                events: events.clone(),
            })
            .sync_flush(true)
            .build()
            .unwrap();

        for i in 0..3 {
            append_text(&rolling, &format!("line {i}"));
            events.lock().unwrap().push(format!("returned {i}"));
        }

        assert_eq!(
            *events.lock().unwrap(),
            [
                "wrote line 0",
                "returned 0",
                "wrote line 1",
                "returned 1",
                "wrote line 2",
                "returned 2",
            ]
        );
    }

    #[test]
    fn test_failing_writes_never_reach_the_caller() {
        for sync_flush in [false, true] {
            let rolling = RollingFile::builder("unused")
                .writer(FailingWriter)
                .max_queue_size(queue_size(16))
                .sync_flush(sync_flush)
                .build()
                .unwrap();

            for i in 0..5000 {
                append_text(&rolling, &format!("doomed {i}"));
                assert!(rolling.queued() <= 16);
            }
            rolling.flush().unwrap();
        }
    }

    #[test]
    fn test_flush_persists_in_enqueue_order() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let now: Timestamp = "2024-08-10T12:00:00Z".parse().unwrap();

        let rolling = RollingFile::builder(temp_dir.path())
            .max_queue_size(queue_size(10_000))
            .clock(Clock::ManualClock(ManualClock::new(now)))
            .build()
            .unwrap();

        let mut expected = String::new();
        for _ in 0..2000 {
            let text = generate_random_string();
            expected.push_str(&text);
            expected.push('\n');
            append_text(&rolling, &text);
        }
        rolling.flush().unwrap();

        let written = fs::read_to_string(temp_dir.path().join("2024-08-10.log")).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_drop_drains_the_queue() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let now: Timestamp = "2024-08-10T12:00:00Z".parse().unwrap();

        let rolling = RollingFile::builder(temp_dir.path().join("logs"))
            .clock(Clock::ManualClock(ManualClock::new(now)))
            .build()
            .unwrap();
        for i in 0..100 {
            append_text(&rolling, &format!("line {i}"));
        }
        drop(rolling);

        let written = fs::read_to_string(temp_dir.path().join("logs/2024-08-10.log")).unwrap();
        assert_eq!(written.lines().count(), 100);
        assert_eq!(written.lines().last(), Some("line 99"));
    }

    #[test]
    fn test_from_config() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = Config {
            log_directory: temp_dir.path().to_path_buf(),
            max_queue_size: queue_size(7),
            sync_flush: true,
            ..Config::default()
        };

        let builder = RollingFileBuilder::from_config(&config);
        assert_eq!(builder.writer.dir(), temp_dir.path());
        assert_eq!(builder.max_queue_size.get(), 7);
        assert!(builder.sync_flush);

        let rolling = builder.build().unwrap();
        append_text(&rolling, "synced");
        assert_eq!(rolling.queued(), 0);
    }
}
