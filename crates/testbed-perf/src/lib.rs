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

//! Benchmark summaries to metrics points.
//!
//! Performance test suites publish their results to a time-series store so
//! regressions show up on dashboards. This crate turns benchmark summaries
//! into point data ready for a metrics client to write.
//!
//! ## Usage
//!
//! ```no_run
//! use chrono::Utc;
//! use testbed_perf::{point_results, Summary};
//!
//! let summary = Summary::from_json_file("target/bench/summary.json")?;
//! match point_results(&[summary], Utc::now()) {
//!     Ok(points) => println!("{} points ready to write", points.len()),
//!     Err(failures) => eprintln!("{} failed execution attempts", failures.len()),
//! }
//! # Ok::<(), testbed_perf::PerfError>(())
//! ```

pub mod aggregate;
pub mod converter;
pub mod error;
pub mod point;
pub mod summary;

pub use aggregate::all_or_failed;
pub use converter::{point_results, to_point};
pub use error::{PerfError, PerfResult};
pub use point::{FieldValue, Point, WritePrecision};
pub use summary::{
    BenchmarkCase, BenchmarkReport, CpuInfo, ExecuteResult, HostEnvironmentInfo, Metric,
    MetricDescriptor, Statistics, Summary,
};
