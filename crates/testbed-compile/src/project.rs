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

//! Source projects assembled from directories on disk.
//!
//! A [`SourceProject`] collects every source file under a base directory and
//! any additional directories, skips excluded subtrees, and compiles the
//! result against the host's loaded modules plus its own [`References`].
//!
//! # Examples
//!
//! ```ignore
//! use std::sync::Arc;
//! use testbed_compile::{ProjectReference, SourceProject, Project};
//!
//! let compiler = Arc::new(MyFrontEnd::default());
//! let shared = SourceProject::builder(compiler.clone(), "fixtures/Shared").build()?;
//! let app = SourceProject::builder(compiler, "fixtures/App")
//!     .exclude("obj")
//!     .reference(ProjectReference::new(shared))
//!     .build()?;
//!
//! let compilation = app.compile()?;
//! ```

use crate::compiler::{host_references, CompilationOptions, Compiler, MetadataReference};
use crate::error::{CompileError, CompileResult};
use crate::reference::{Reference, References};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use testbed::paths::{self, Paths};
use tracing::debug;
use walkdir::WalkDir;

/// A project that can enumerate its sources and compile them.
pub trait Project<C: Compiler> {
    /// Compiles every file returned by [`files`](Project::files).
    fn compile(&self) -> CompileResult<C::Compilation>;

    /// Absolute paths of the project's source files.
    fn files(&self) -> CompileResult<Vec<PathBuf>>;
}

/// A project rooted in a directory.
pub struct SourceProject<C: Compiler> {
    compiler: Arc<C>,
    name: String,
    base_path: PathBuf,
    additional_paths: Vec<PathBuf>,
    exclude_prefixes: Vec<PathBuf>,
    references: References<C>,
}

impl<C: Compiler> SourceProject<C> {
    /// Creates a project rooted at `base_path`.
    ///
    /// Each exclusion is combined with the base path and with every
    /// additional path. Relative paths resolve against the current directory.
    pub fn new(
        compiler: Arc<C>,
        base_path: impl AsRef<Path>,
        additional_paths: Paths,
        excludes: Paths,
        references: References<C>,
    ) -> CompileResult<Self> {
        let base_path = make_absolute(base_path.as_ref())?;
        let name = project_name(&base_path);

        let additional_paths = additional_paths
            .iter()
            .map(|path| make_absolute(path))
            .collect::<CompileResult<Vec<_>>>()?;

        let mut exclude_prefixes = Vec::with_capacity(excludes.len() * (additional_paths.len() + 1));
        for exclude in &excludes {
            exclude_prefixes.push(make_absolute(&base_path.join(exclude))?);
        }
        for additional in &additional_paths {
            for exclude in &excludes {
                exclude_prefixes.push(make_absolute(&additional.join(exclude))?);
            }
        }

        debug!(
            project = %name,
            base = %base_path.display(),
            additional = additional_paths.len(),
            excludes = exclude_prefixes.len(),
            references = references.len(),
            "created source project"
        );

        Ok(Self {
            compiler,
            name,
            base_path,
            additional_paths,
            exclude_prefixes,
            references,
        })
    }

    /// Starts a builder for a project rooted at `base_path`.
    pub fn builder(compiler: Arc<C>, base_path: impl Into<PathBuf>) -> SourceProjectBuilder<C> {
        SourceProjectBuilder {
            compiler,
            base_path: base_path.into(),
            additional_paths: Paths::new(),
            excludes: Paths::new(),
            references: References::new(),
        }
    }

    /// Project name, taken from the base directory's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn additional_paths(&self) -> &[PathBuf] {
        &self.additional_paths
    }

    /// Absolute path prefixes whose files are skipped.
    pub fn exclude_prefixes(&self) -> &[PathBuf] {
        &self.exclude_prefixes
    }

    pub fn references(&self) -> &References<C> {
        &self.references
    }

    /// Plain string prefix match, so excluding `obj` also skips `objects`.
    fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.exclude_prefixes
            .iter()
            .any(|prefix| path.starts_with(&*prefix.to_string_lossy()))
    }

    fn is_source(path: &Path) -> bool {
        path.is_file() && path.extension().is_some_and(|ext| ext == C::SOURCE_EXTENSION)
    }

    /// References for the compilation: host modules first, then project
    /// references not already provided by the host.
    fn resolve_references(&self) -> CompileResult<Vec<C::Metadata>> {
        let mut resolved = host_references(self.compiler.as_ref())?;
        let host_displays: HashSet<String> = resolved
            .iter()
            .map(|metadata| metadata.display().to_string())
            .collect();

        for reference in self.references.iter() {
            let metadata = reference.resolve()?;
            if host_displays.contains(metadata.display()) {
                debug!(
                    reference = metadata.display(),
                    "skipping reference already loaded by host"
                );
                continue;
            }
            resolved.push(metadata);
        }

        Ok(resolved)
    }
}

impl<C: Compiler> Project<C> for SourceProject<C> {
    fn compile(&self) -> CompileResult<C::Compilation> {
        let references = self.resolve_references()?;

        let trees = self
            .files()?
            .iter()
            .map(|path| {
                let text = std::fs::read_to_string(path).map_err(|e| CompileError::read(path, e))?;
                self.compiler.parse_text(&text, path)
            })
            .collect::<CompileResult<Vec<_>>>()?;

        debug!(
            project = %self.name,
            trees = trees.len(),
            references = references.len(),
            "compiling project"
        );

        self.compiler.create_compilation(
            &self.name,
            trees,
            references,
            &CompilationOptions::library(),
        )
    }

    fn files(&self) -> CompileResult<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        let roots = std::iter::once(&self.base_path).chain(self.additional_paths.iter());
        for root in roots {
            let walker = WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !self.is_excluded(entry.path()));
            for entry in walker {
                let entry = entry?;
                let path = entry.path();
                if !Self::is_source(path) {
                    continue;
                }
                if seen.insert(path.to_path_buf()) {
                    files.push(path.to_path_buf());
                }
            }
        }

        debug!(project = %self.name, files = files.len(), "enumerated source files");
        Ok(files)
    }
}

impl<C: Compiler> fmt::Debug for SourceProject<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceProject")
            .field("name", &self.name)
            .field("base_path", &self.base_path)
            .field("additional_paths", &self.additional_paths)
            .field("exclude_prefixes", &self.exclude_prefixes)
            .field("references", &self.references)
            .finish()
    }
}

/// Builder for [`SourceProject`].
pub struct SourceProjectBuilder<C: Compiler> {
    compiler: Arc<C>,
    base_path: PathBuf,
    additional_paths: Paths,
    excludes: Paths,
    references: References<C>,
}

impl<C: Compiler> SourceProjectBuilder<C> {
    /// Adds a directory searched in addition to the base path.
    pub fn additional_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.additional_paths.push(path);
        self
    }

    pub fn additional_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            self.additional_paths.push(path);
        }
        self
    }

    /// Excludes a subdirectory, relative to the base path and to every
    /// additional path.
    pub fn exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.excludes.push(path);
        self
    }

    pub fn excludes<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            self.excludes.push(path);
        }
        self
    }

    pub fn reference<R>(mut self, reference: R) -> Self
    where
        R: Reference<C> + 'static,
    {
        self.references.push(reference);
        self
    }

    /// Replaces the reference list.
    pub fn references(mut self, references: References<C>) -> Self {
        self.references = references;
        self
    }

    pub fn build(self) -> CompileResult<SourceProject<C>> {
        SourceProject::new(
            self.compiler,
            self.base_path,
            self.additional_paths,
            self.excludes,
            self.references,
        )
    }
}

fn make_absolute(path: &Path) -> CompileResult<PathBuf> {
    paths::absolute(path).map_err(|e| CompileError::read(path, e))
}

fn project_name(base_path: &Path) -> String {
    base_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| base_path.display().to_string())
}
