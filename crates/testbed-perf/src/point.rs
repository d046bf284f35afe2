// Dweve Testbed - Shared test support for Dweve projects
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Time-series point data.
//!
//! A [`Point`] is one timestamped measurement with indexed string tags and
//! value fields, built the same way a metrics client builds its write
//! payloads:
//!
//! ```
//! use chrono::Utc;
//! use testbed_perf::point::{Point, WritePrecision};
//!
//! let point = Point::measurement("Parser.Parse")
//!     .tag("Runtime", "DefaultJob")
//!     .field("Mean", 120.5)
//!     .timestamp(Utc::now(), WritePrecision::Ns);
//!
//! assert_eq!(point.tag_value("Runtime"), Some("DefaultJob"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resolution the timestamp is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WritePrecision {
    /// Nanoseconds.
    Ns,
    /// Microseconds.
    Us,
    /// Milliseconds.
    Ms,
    /// Seconds.
    S,
}

/// A field value.
///
/// `Integer` is tried before `Float` when deserializing, so whole numbers
/// written without a fraction come back as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

/// One timestamped measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    measurement: String,
    tags: BTreeMap<String, String>,
    fields: BTreeMap<String, FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<DateTime<Utc>>,
    precision: WritePrecision,
}

impl Point {
    /// Starts a point for `name`.
    pub fn measurement(name: impl Into<String>) -> Self {
        Self {
            measurement: name.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            time: None,
            precision: WritePrecision::Ns,
        }
    }

    /// Sets a tag. A repeated key replaces the earlier value.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Sets a field. A repeated key replaces the earlier value.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn timestamp(mut self, time: DateTime<Utc>, precision: WritePrecision) -> Self {
        self.time = Some(time);
        self.precision = precision;
        self
    }

    pub fn name(&self) -> &str {
        &self.measurement
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn field_value(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    pub fn precision(&self) -> WritePrecision {
        self.precision
    }

    /// Timestamp as an integer in the point's precision. `None` when no
    /// timestamp is set or it does not fit in an `i64` at nanosecond
    /// resolution.
    pub fn timestamp_value(&self) -> Option<i64> {
        let time = self.time?;
        match self.precision {
            WritePrecision::Ns => time.timestamp_nanos_opt(),
            WritePrecision::Us => Some(time.timestamp_micros()),
            WritePrecision::Ms => Some(time.timestamp_millis()),
            WritePrecision::S => Some(time.timestamp()),
        }
    }
}
