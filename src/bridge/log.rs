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

use serde_json::Map;
use serde_json::Value;

use crate::Level;
use crate::Logger;

/// `trace` records are emitted as [`Level::Debug`]. Key-values of a record become one JSON object
/// supplementary argument.
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if !Logger::enabled(self, level) {
            return;
        }

        let mut fields = Map::new();
        let mut visitor = KeyValueVisitor {
            fields: &mut fields,
        };
        // the visitor never fails
        let _ = record.key_values().visit(&mut visitor);

        if fields.is_empty() {
            Logger::log(self, level, record.args(), &[]);
        } else {
            Logger::log(self, level, record.args(), &[Value::Object(fields)]);
        }
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

struct KeyValueVisitor<'a> {
    fields: &'a mut Map<String, Value>,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KeyValueVisitor<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.fields.insert(key.to_string(), to_json(&value));
        Ok(())
    }
}

fn to_json(value: &log::kv::Value<'_>) -> Value {
    if let Some(v) = value.to_bool() {
        Value::Bool(v)
    } else if let Some(v) = value.to_i64() {
        Value::from(v)
    } else if let Some(v) = value.to_u64() {
        Value::from(v)
    } else if let Some(v) = value.to_f64() {
        Value::from(v)
    } else {
        Value::String(value.to_string())
    }
}
