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
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;

/// The persistence step of the rolling file flush loop.
///
/// The writer thread calls [`prepare`](BatchWriter::prepare) before taking each batch off the
/// queue, then hands the batch to [`write_batch`](BatchWriter::write_batch). Both receive the
/// time read by the flush loop for that batch.
pub trait BatchWriter: fmt::Debug + Send + 'static {
    /// Make the destination for `now` ready to accept a batch.
    ///
    /// When this fails, the queued lines stay queued for the next flush.
    fn prepare(&mut self, now: Timestamp) -> Result<(), Error> {
        let _ = now;
        Ok(())
    }

    /// Persist one batch of newline-terminated lines.
    ///
    /// When this fails, the lines of `batch` are lost.
    fn write_batch(&mut self, now: Timestamp, batch: &[u8]) -> Result<(), Error>;
}

/// Return the path of the log file for the UTC calendar date of `now`.
///
/// The mapping holds no state, so independent processes agree on it.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use dailylog::append::rolling_file::log_file_path;
///
/// let now = "2024-08-10T23:30:00-02:00".parse().unwrap();
/// assert_eq!(log_file_path("logs", now), Path::new("logs/2024-08-11.log"));
/// ```
pub fn log_file_path(dir: impl AsRef<Path>, now: Timestamp) -> PathBuf {
    let date = now.to_zoned(TimeZone::UTC).strftime("%Y-%m-%d");
    dir.as_ref().join(format!("{date}.log"))
}

/// A [`BatchWriter`] appending to one file per UTC day, named `YYYY-MM-DD.log`.
///
/// The target path is recomputed for every batch, so a flush that crosses midnight continues in
/// the new day's file. Files are opened in append mode and never truncated.
#[derive(Debug)]
pub struct DailyFileWriter {
    dir: PathBuf,
    current: Option<PathBuf>,
}

impl DailyFileWriter {
    /// Create a writer for the given base directory.
    ///
    /// Nothing is touched on disk until the first batch.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            current: None,
        }
    }

    /// The base directory of the log files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that received the last successful batch.
    ///
    /// A hint for diagnostics only; every batch recomputes its target from the clock.
    pub fn current_file(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    fn create_dir(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            Error::new("failed to create log directory")
                .with_context("dir", self.dir.display())
                .with_source(err)
        })
    }
}

impl BatchWriter for DailyFileWriter {
    fn prepare(&mut self, _: Timestamp) -> Result<(), Error> {
        self.create_dir()
    }

    fn write_batch(&mut self, now: Timestamp, batch: &[u8]) -> Result<(), Error> {
        let path = log_file_path(&self.dir, now);

        let mut file = match open_append(&path) {
            Ok(file) => file,
            // the directory vanished since prepare
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.create_dir()?;
                open_append(&path).map_err(|err| open_error(&path, err))?
            }
            Err(err) => return Err(open_error(&path, err)),
        };

        file.write_all(batch).map_err(|err| {
            Error::new("failed to write log batch")
                .with_context("path", path.display())
                .with_source(err)
        })?;

        self.current = Some(path);
        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().append(true).create(true).open(path)
}

fn open_error(path: &Path, err: io::Error) -> Error {
    Error::new("failed to open log file")
        .with_context("path", path.display())
        .with_source(err)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_path_is_keyed_by_utc_date() {
        assert_eq!(
            log_file_path("/var/log/app", ts("2024-02-29T00:00:00Z")),
            Path::new("/var/log/app/2024-02-29.log")
        );
        assert_eq!(
            log_file_path("logs", ts("2024-12-31T23:59:59.999Z")),
            Path::new("logs/2024-12-31.log")
        );
        // local offsets do not matter, only the UTC date
        assert_eq!(
            log_file_path("logs", ts("2025-01-01T05:00:00+08:00")),
            Path::new("logs/2024-12-31.log")
        );
    }

    #[test]
    fn test_writes_append_and_create_directories() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path().join("nested").join("logs");
        let now = ts("2024-08-10T12:00:00Z");

        let mut writer = DailyFileWriter::new(&dir);
        assert_eq!(writer.current_file(), None);

        writer.prepare(now).unwrap();
        writer.write_batch(now, b"one\n").unwrap();
        writer.write_batch(now, b"two\nthree\n").unwrap();

        let path = dir.join("2024-08-10.log");
        assert_eq!(writer.current_file(), Some(path.as_path()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_existing_content_is_kept() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let path = temp_dir.path().join("2024-08-10.log");
        fs::write(&path, "from another process\n").unwrap();

        let now = ts("2024-08-10T08:00:00Z");
        let mut writer = DailyFileWriter::new(temp_dir.path());
        writer.write_batch(now, b"ours\n").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "from another process\nours\n"
        );
    }

    #[test]
    fn test_write_recreates_removed_directory() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path().join("logs");
        let now = ts("2024-08-10T08:00:00Z");

        let mut writer = DailyFileWriter::new(&dir);
        writer.prepare(now).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        writer.write_batch(now, b"still here\n").unwrap();
        assert_eq!(
            fs::read_to_string(dir.join("2024-08-10.log")).unwrap(),
            "still here\n"
        );
    }

    #[test]
    fn test_prepare_fails_when_directory_is_a_file() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path().join("occupied");
        fs::write(&dir, "not a directory").unwrap();

        let mut writer = DailyFileWriter::new(&dir);
        let err = writer.prepare(ts("2024-08-10T08:00:00Z")).unwrap_err();
        assert_eq!(err.message(), "failed to create log directory");
        assert!(
            writer
                .write_batch(ts("2024-08-10T08:00:00Z"), b"lost\n")
                .is_err()
        );
    }
}
