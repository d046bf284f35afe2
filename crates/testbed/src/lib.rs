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

//! Shared test support for Dweve test suites.
//!
//! This crate holds small helpers that test code across the workspace
//! reaches for repeatedly:
//!
//! - **Path lookup**: find fixture files by walking upward from the current
//!   directory, an explicit base, or the test executable ([`paths`])
//! - **Scoped values**: change a global setting for the duration of a scope
//!   and have it restored on every exit path ([`temporarily`])
//!
//! # Quick Start
//!
//! ```no_run
//! use testbed::{paths, temporarily};
//! use std::cell::Cell;
//!
//! let schema = paths::find_upwards("fixtures/schema.json")?;
//!
//! let verbosity = Cell::new(0);
//! {
//!     let _guard = temporarily::set(3, |v| verbosity.set(v), || verbosity.get());
//!     // code under test sees verbosity 3
//! }
//! assert_eq!(verbosity.get(), 0);
//! # Ok::<(), testbed::PathError>(())
//! ```

/// Error types for path lookups.
pub mod error;

/// Path collection and upward path search.
pub mod paths;

/// Scoped value guard.
pub mod temporarily;

pub use error::{PathError, PathResult};
pub use paths::{
    exists, find_upwards, find_upwards_from, find_upwards_from_executable, try_find_upwards,
    try_find_upwards_from, try_find_upwards_from_executable, Paths,
};
pub use temporarily::TemporarilySet;
