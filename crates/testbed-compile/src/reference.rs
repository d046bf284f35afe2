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

//! References a test project compiles against.
//!
//! A [`Reference`] produces one metadata reference for a compilation. Two
//! kinds exist:
//!
//! - [`FileReference`]: a compiled artifact on disk, loaded once when the
//!   reference is created
//! - [`ProjectReference`]: another project, compiled on first use and
//!   memoized
//!
//! [`References`] is the ordered list attached to a project.

use crate::compiler::{Compilation, Compiler};
use crate::error::CompileResult;
use crate::project::Project;
use once_cell::sync::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Something that resolves to a metadata reference.
pub trait Reference<C: Compiler>: Send + Sync {
    /// Produces the metadata reference a compilation links against.
    fn resolve(&self) -> CompileResult<C::Metadata>;
}

/// A reference to a compiled artifact on disk.
pub struct FileReference<C: Compiler> {
    path: PathBuf,
    metadata: C::Metadata,
}

impl<C: Compiler> FileReference<C> {
    /// Loads the artifact at `path` through `compiler`.
    pub fn new(compiler: &C, path: impl Into<PathBuf>) -> CompileResult<Self> {
        let path = path.into();
        let metadata = compiler.metadata_from_file(&path)?;
        Ok(Self { path, metadata })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<C: Compiler> Reference<C> for FileReference<C> {
    fn resolve(&self) -> CompileResult<C::Metadata> {
        Ok(self.metadata.clone())
    }
}

impl<C: Compiler> fmt::Debug for FileReference<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileReference")
            .field("path", &self.path)
            .finish()
    }
}

/// A reference to another project.
///
/// The project is compiled the first time [`resolve`](Reference::resolve)
/// succeeds and the resulting metadata is returned on every later call.
/// Concurrent callers block until the first compilation finishes. A failed
/// compilation is not cached: the next call compiles again.
pub struct ProjectReference<C: Compiler> {
    project: Arc<dyn Project<C> + Send + Sync>,
    metadata: OnceCell<C::Metadata>,
}

impl<C: Compiler> ProjectReference<C> {
    /// Wraps a project owned by this reference.
    pub fn new<P>(project: P) -> Self
    where
        P: Project<C> + Send + Sync + 'static,
    {
        Self::from_arc(Arc::new(project))
    }

    /// Wraps a project that is shared with other owners.
    pub fn from_arc(project: Arc<dyn Project<C> + Send + Sync>) -> Self {
        Self {
            project,
            metadata: OnceCell::new(),
        }
    }

    /// True once the project has been compiled successfully.
    pub fn is_resolved(&self) -> bool {
        self.metadata.get().is_some()
    }
}

impl<C: Compiler> Reference<C> for ProjectReference<C> {
    fn resolve(&self) -> CompileResult<C::Metadata> {
        self.metadata
            .get_or_try_init(|| -> CompileResult<C::Metadata> {
                let compilation = self.project.compile()?;
                debug!(project = compilation.name(), "compiled project reference");
                Ok(compilation.to_metadata_reference())
            })
            .cloned()
    }
}

impl<C: Compiler> fmt::Debug for ProjectReference<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectReference")
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

/// Ordered, duplicate-tolerant list of references.
pub struct References<C: Compiler> {
    list: Vec<Arc<dyn Reference<C>>>,
}

impl<C: Compiler> References<C> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// Appends a reference, builder style.
    pub fn with<R>(mut self, reference: R) -> Self
    where
        R: Reference<C> + 'static,
    {
        self.push(reference);
        self
    }

    /// Appends a reference.
    pub fn push<R>(&mut self, reference: R)
    where
        R: Reference<C> + 'static,
    {
        self.list.push(Arc::new(reference));
    }

    /// Appends a reference that is shared with other collections.
    pub fn push_shared(&mut self, reference: Arc<dyn Reference<C>>) {
        self.list.push(reference);
    }

    /// Number of references, duplicates included.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// References in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Reference<C>>> {
        self.list.iter()
    }
}

impl<C: Compiler> Default for References<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Compiler> Clone for References<C> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<C: Compiler> FromIterator<Arc<dyn Reference<C>>> for References<C> {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Reference<C>>>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<C: Compiler> fmt::Debug for References<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("References")
            .field("len", &self.list.len())
            .finish()
    }
}
