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

//! The seam between test projects and a compiler front-end.
//!
//! A [`Compiler`] parses source text into syntax trees, loads metadata
//! references from compiled artifacts, and assembles compilations. Test
//! projects only ever talk to the front-end through this trait, so the
//! same project fixtures work against any front-end that implements it.

use crate::error::CompileResult;
use std::path::{Path, PathBuf};

/// An opaque handle to a compiled artifact's exported surface.
///
/// Two references with the same [`display`](MetadataReference::display)
/// name are treated as the same dependency.
pub trait MetadataReference: Clone + Send + Sync + 'static {
    /// Human-readable identity, usually the artifact path or assembly name.
    fn display(&self) -> &str;
}

/// An immutable compilation produced by a [`Compiler`].
pub trait Compilation {
    /// Reference type this compilation can be turned into.
    type Metadata: MetadataReference;

    /// Name of the compiled unit.
    fn name(&self) -> &str;

    /// Exposes this compilation as a dependency for other compilations.
    fn to_metadata_reference(&self) -> Self::Metadata;
}

/// What kind of artifact a compilation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputKind {
    /// A library with no entry point.
    #[default]
    Library,
    /// A console executable.
    ConsoleApplication,
}

/// Options passed to [`Compiler::create_compilation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompilationOptions {
    /// Artifact kind.
    pub output_kind: OutputKind,
    /// Whether nullable reference checking is enabled.
    pub nullable_checks: bool,
}

impl CompilationOptions {
    /// Library output with nullable checks enabled. Test projects always
    /// compile with these options.
    pub const fn library() -> Self {
        Self {
            output_kind: OutputKind::Library,
            nullable_checks: true,
        }
    }

    pub fn with_output_kind(mut self, output_kind: OutputKind) -> Self {
        self.output_kind = output_kind;
        self
    }

    pub fn with_nullable_checks(mut self, enabled: bool) -> Self {
        self.nullable_checks = enabled;
        self
    }
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self::library()
    }
}

/// A module already loaded into the host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    /// Module name.
    pub name: String,
    /// Location on disk. `None` for modules that only exist in memory.
    pub location: Option<PathBuf>,
    /// Generated at runtime rather than loaded from an artifact.
    pub dynamic: bool,
}

impl LoadedModule {
    /// A module loaded from an artifact on disk.
    pub fn from_file(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location: Some(location.into()),
            dynamic: false,
        }
    }

    /// A module emitted at runtime.
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            dynamic: true,
        }
    }
}

/// A compiler front-end.
pub trait Compiler: Send + Sync + 'static {
    /// File extension of source files, without the leading dot.
    const SOURCE_EXTENSION: &'static str;

    /// Metadata reference handle.
    type Metadata: MetadataReference;
    /// Parsed source file.
    type SyntaxTree;
    /// Compilation output.
    type Compilation: Compilation<Metadata = Self::Metadata>;

    /// Parses one source file. `path` is recorded in diagnostics only.
    fn parse_text(&self, text: &str, path: &Path) -> CompileResult<Self::SyntaxTree>;

    /// Loads a metadata reference from a compiled artifact.
    fn metadata_from_file(&self, path: &Path) -> CompileResult<Self::Metadata>;

    /// Modules the host process has already loaded.
    fn loaded_modules(&self) -> Vec<LoadedModule>;

    /// Builds a compilation from parsed trees and references.
    fn create_compilation(
        &self,
        name: &str,
        trees: Vec<Self::SyntaxTree>,
        references: Vec<Self::Metadata>,
        options: &CompilationOptions,
    ) -> CompileResult<Self::Compilation>;
}

/// Metadata references for every non-dynamic module the host has loaded.
///
/// Modules without a location on disk are skipped as well.
pub fn host_references<C: Compiler>(compiler: &C) -> CompileResult<Vec<C::Metadata>> {
    compiler
        .loaded_modules()
        .into_iter()
        .filter(|module| !module.dynamic)
        .filter_map(|module| module.location)
        .map(|location| compiler.metadata_from_file(&location))
        .collect()
}
