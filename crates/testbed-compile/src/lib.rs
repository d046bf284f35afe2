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

//! In-memory projects for compiler front-end tests.
//!
//! Tests that exercise a compiler, analyzer, or source generator need to
//! compile small synthetic source trees with precise control over which
//! files and which dependencies go in. This crate provides that layer on top
//! of any front-end implementing [`Compiler`].
//!
//! # Features
//!
//! - **Source projects**: collect files by extension under a base directory
//!   and extra directories, with excluded subtrees ([`SourceProject`])
//! - **References**: compiled artifacts ([`FileReference`]) or other
//!   projects compiled once on demand ([`ProjectReference`])
//! - **Analyzer options**: dictionary-backed options and a test provider
//!   ([`analyzer_config`])
//!
//! Every compilation references the host's loaded non-dynamic modules
//! first. A project reference whose display name matches one of those is
//! skipped, so the host's copy wins.

/// Analyzer configuration options for tests.
pub mod analyzer_config;

/// Compiler front-end seam.
pub mod compiler;

/// Error types.
pub mod error;

/// Source projects.
pub mod project;

/// File and project references.
pub mod reference;

pub use analyzer_config::{
    AnalyzerConfigOptions, AnalyzerConfigOptionsProvider, DictionaryAnalyzerConfigOptions,
    TestAnalyzerConfigOptionsProvider,
};
pub use compiler::{
    host_references, Compilation, CompilationOptions, Compiler, LoadedModule, MetadataReference,
    OutputKind,
};
pub use error::{CompileError, CompileResult};
pub use project::{Project, SourceProject, SourceProjectBuilder};
pub use reference::{FileReference, ProjectReference, Reference, References};
