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

//! Benchmark report to point conversion.
//!
//! Each successful [`BenchmarkReport`] becomes one [`Point`]:
//!
//! | part        | source                                 |
//! |-------------|----------------------------------------|
//! | measurement | `case.display_info`                    |
//! | tags        | `Runtime`, `CPU`, `Configuration`      |
//! | fields      | `Mean`, `StdDev`, `StdErr`, `Allocated` if reported |
//! | timestamp   | caller-supplied, nanosecond precision  |
//!
//! A batch is all-or-failed: one failed report anywhere discards every
//! point and the result carries the execution attempts of all failed
//! reports instead.

use crate::aggregate::all_or_failed;
use crate::point::{Point, WritePrecision};
use crate::summary::{BenchmarkReport, ExecuteResult, Summary, ALLOCATED_METRIC};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

pub const RUNTIME_TAG: &str = "Runtime";
pub const CPU_TAG: &str = "CPU";
pub const CONFIGURATION_TAG: &str = "Configuration";

pub const MEAN_FIELD: &str = "Mean";
pub const STD_DEV_FIELD: &str = "StdDev";
pub const STD_ERR_FIELD: &str = "StdErr";
pub const ALLOCATED_FIELD: &str = "Allocated";

/// Converts every report of every summary into a point.
///
/// Reports are processed in input order. Returns all points when every
/// report succeeded, otherwise the concatenated execution results of the
/// failed reports.
pub fn point_results(
    summaries: &[Summary],
    timestamp: DateTime<Utc>,
) -> Result<Vec<Point>, Vec<ExecuteResult>> {
    let pairs = summaries
        .iter()
        .flat_map(|summary| summary.reports.iter().map(move |report| (summary, report)));

    let result = all_or_failed(pairs, |(summary, report)| to_point(summary, report, timestamp))
        .map_err(|failures| failures.into_iter().flatten().collect::<Vec<_>>());

    match &result {
        Ok(points) => debug!(points = points.len(), "converted benchmark reports"),
        Err(failures) => warn!(
            execute_results = failures.len(),
            "benchmark batch contains failed reports, no points produced"
        ),
    }
    result
}

/// Converts a single report.
///
/// A report marked successful but without statistics is treated as failed.
pub fn to_point(
    summary: &Summary,
    report: &BenchmarkReport,
    timestamp: DateTime<Utc>,
) -> Result<Point, Vec<ExecuteResult>> {
    let Some(statistics) = report.successful_statistics() else {
        warn!(
            benchmark = %report.case.display_info,
            attempts = report.execute_results.len(),
            "benchmark report failed"
        );
        return Err(report.execute_results.clone());
    };

    let mut point = Point::measurement(report.case.display_info.as_str())
        .tag(RUNTIME_TAG, report.case.job_id.as_str())
        .tag(CPU_TAG, summary.host.cpu.processor_name.as_str())
        .tag(CONFIGURATION_TAG, summary.host.configuration.as_str());

    if let Some(allocated) = report.metric(ALLOCATED_METRIC) {
        point = point.field(ALLOCATED_FIELD, allocated.value);
    }

    Ok(point
        .field(MEAN_FIELD, statistics.mean)
        .field(STD_DEV_FIELD, statistics.standard_deviation)
        .field(STD_ERR_FIELD, statistics.standard_error)
        .timestamp(timestamp, WritePrecision::Ns))
}
