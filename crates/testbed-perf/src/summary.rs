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

//! Read-only model of benchmark run summaries.
//!
//! A [`Summary`] describes one benchmark run on one host and holds a
//! [`BenchmarkReport`] per benchmark case. The model mirrors what benchmark
//! runners export, so summaries can be loaded straight from their JSON
//! output.

use crate::error::PerfResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display name of the allocation metric.
pub const ALLOCATED_METRIC: &str = "Allocated";

/// One benchmark run on one host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub host: HostEnvironmentInfo,
    #[serde(default)]
    pub reports: Vec<BenchmarkReport>,
}

impl Summary {
    pub fn new(title: impl Into<String>, host: HostEnvironmentInfo) -> Self {
        Self {
            title: title.into(),
            host,
            reports: Vec::new(),
        }
    }

    /// Adds a report, builder style.
    pub fn with_report(mut self, report: BenchmarkReport) -> Self {
        self.reports.push(report);
        self
    }

    pub fn from_json_str(json: &str) -> PerfResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> PerfResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Host the benchmarks ran on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEnvironmentInfo {
    pub cpu: CpuInfo,
    /// Build configuration, e.g. `RELEASE`.
    pub configuration: String,
}

impl HostEnvironmentInfo {
    pub fn new(processor_name: impl Into<String>, configuration: impl Into<String>) -> Self {
        Self {
            cpu: CpuInfo {
                processor_name: processor_name.into(),
            },
            configuration: configuration.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub processor_name: String,
}

/// The benchmark a report belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkCase {
    /// Display descriptor, e.g. `Parser.ParseLarge`.
    pub display_info: String,
    /// Job the case ran under, usually the runtime moniker.
    pub job_id: String,
}

/// Summary statistics in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    pub standard_deviation: f64,
    pub standard_error: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    pub id: String,
    pub display_name: String,
}

/// An extra metric collected by a diagnoser, such as allocated bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub descriptor: MetricDescriptor,
    pub value: f64,
}

impl Metric {
    pub fn new(display_name: impl Into<String>, value: f64) -> Self {
        let display_name = display_name.into();
        Self {
            descriptor: MetricDescriptor {
                id: display_name.clone(),
                display_name,
            },
            value,
        }
    }
}

/// One attempt at executing a benchmark process.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecuteResult {
    pub found_executable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_id: Option<u32>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub standard_output: Vec<String>,
}

impl ExecuteResult {
    /// A failed attempt with a single error line.
    pub fn failed(exit_code: i32, error: impl Into<String>) -> Self {
        Self {
            found_executable: true,
            exit_code: Some(exit_code),
            process_id: None,
            errors: vec![error.into()],
            standard_output: Vec::new(),
        }
    }
}

/// Outcome of one benchmark case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub case: BenchmarkCase,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub execute_results: Vec<ExecuteResult>,
}

impl BenchmarkReport {
    /// A successful report.
    pub fn succeeded(
        display_info: impl Into<String>,
        job_id: impl Into<String>,
        statistics: Statistics,
    ) -> Self {
        Self {
            case: BenchmarkCase {
                display_info: display_info.into(),
                job_id: job_id.into(),
            },
            success: true,
            statistics: Some(statistics),
            metrics: Vec::new(),
            execute_results: Vec::new(),
        }
    }

    /// A failed report carrying its execution attempts.
    pub fn failed(
        display_info: impl Into<String>,
        job_id: impl Into<String>,
        execute_results: Vec<ExecuteResult>,
    ) -> Self {
        Self {
            case: BenchmarkCase {
                display_info: display_info.into(),
                job_id: job_id.into(),
            },
            success: false,
            statistics: None,
            metrics: Vec::new(),
            execute_results,
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    /// First metric with the given display name.
    pub fn metric(&self, display_name: &str) -> Option<&Metric> {
        self.metrics
            .iter()
            .find(|m| m.descriptor.display_name == display_name)
    }

    /// Statistics of a successful run. `None` if the run failed or produced
    /// no statistics.
    pub fn successful_statistics(&self) -> Option<&Statistics> {
        if self.success {
            self.statistics.as_ref()
        } else {
            None
        }
    }
}
