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

//! Error types for project discovery and compilation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while enumerating, reading, or compiling a project.
#[derive(Error, Debug)]
pub enum CompileError {
    /// A source file or artifact could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A search directory could not be walked.
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// The compiler front-end rejected its input.
    #[error("Compiler error: {0}")]
    Frontend(String),
}

impl CompileError {
    /// Wraps an I/O error with the path it happened on.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Front-end failure with a message.
    pub fn frontend(message: impl Into<String>) -> Self {
        Self::Frontend(message.into())
    }
}

/// Result type for compile operations.
pub type CompileResult<T> = Result<T, CompileError>;
