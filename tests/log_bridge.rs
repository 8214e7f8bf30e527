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

//! Installs the global `log` logger, so it runs in its own test binary.

use std::fs;

use dailylog::Config;
use dailylog::Level;
use dailylog::Logger;
use tempfile::TempDir;

#[test]
fn test_log_crate_records_reach_the_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let config = Config {
        log_directory: temp_dir.path().to_path_buf(),
        min_level: Level::Info,
        ..Config::default()
    };

    let logger = Logger::from_config(&config).unwrap().apply().unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    log::trace!("hidden");
    log::debug!("hidden");
    log::info!(user = "alice", admin = false; "user created");
    log::error!("failed to reach {}", "postgres");
    dailylog::success!(logger, "served through the handle");
    log::logger().flush();

    let mut content = String::new();
    for entry in fs::read_dir(temp_dir.path()).unwrap() {
        content.push_str(&fs::read_to_string(entry.unwrap().path()).unwrap());
    }

    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3, "{content}");
    assert!(lines[0].ends_with(r#"[INFO] user created [{"admin":false,"user":"alice"}]"#));
    assert!(lines[1].ends_with("[ERROR] failed to reach postgres"));
    assert!(lines[2].ends_with("[SUCCESS] served through the handle"));

    // a second logger cannot be installed
    let second = Logger::builder().build();
    assert!(second.apply().is_err());
}
