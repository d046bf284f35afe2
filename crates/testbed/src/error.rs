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

//! Error types for path lookups.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the [`paths`](crate::paths) helpers.
#[derive(Error, Debug)]
pub enum PathError {
    /// No ancestor directory contained the requested path.
    #[error("The path: {} was not found", path.display())]
    NotFound {
        /// The relative path that was searched for.
        path: PathBuf,
    },

    /// The starting directory could not be determined.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PathError {
    /// Create a not-found error for `path`.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// The path that was searched for, if this is a not-found error.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::NotFound { path } => Some(path),
            Self::Io(_) => None,
        }
    }
}

/// Result type for path lookups.
pub type PathResult<T> = Result<T, PathError>;
