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

//! File-system path helpers for locating test fixtures.
//!
//! Tests usually run from a crate directory, a workspace root, or a target
//! directory depending on how they are invoked. The upward finders make
//! fixture lookup independent of that by walking from a starting directory
//! toward the root until the requested relative path exists.
//!
//! # Examples
//!
//! ```no_run
//! use testbed::paths;
//!
//! // Finds e.g. `<workspace>/fixtures/users.json` from any crate directory.
//! let fixture = paths::find_upwards("fixtures/users.json").unwrap();
//! assert!(paths::exists(&fixture));
//! ```

use crate::error::{PathError, PathResult};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// An ordered collection of file-system paths.
///
/// Used for search roots and exclusions. Order is preserved and duplicates
/// are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paths(Vec<PathBuf>);

impl Paths {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a path.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.0.push(path.into());
    }

    /// Appends a path, builder style.
    pub fn with(mut self, path: impl Into<PathBuf>) -> Self {
        self.push(path);
        self
    }

    /// Number of paths, duplicates included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no path has been added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Paths in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for Paths {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Paths {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Paths {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Returns true if `path` exists as a file or a directory.
pub fn exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.is_dir() || path.is_file()
}

/// Makes `path` absolute against the current directory and removes `.` and
/// `..` components without touching the file system.
///
/// Symlinks are not resolved, so the result can be compared against paths
/// produced by walking a directory that was itself made absolute this way.
pub fn absolute(path: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&joined))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, matching how the OS treats `/..`.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Searches upward from `base` for `relative`.
///
/// Tests `base/relative`, then the same relative path under each ancestor
/// of `base`, and returns the first one that exists. Returns `None`
/// without checking anything when `relative` is rooted.
pub fn try_find_upwards_from(base: impl AsRef<Path>, relative: impl AsRef<Path>) -> Option<PathBuf> {
    let relative = relative.as_ref();
    if relative.has_root() || relative.is_absolute() {
        return None;
    }

    let base = absolute(base).ok()?;
    let found = base
        .ancestors()
        .map(|dir| dir.join(relative))
        .find(|candidate| exists(candidate));

    match &found {
        Some(path) => debug!(path = %path.display(), "found path upwards"),
        None => debug!(
            relative = %relative.display(),
            base = %base.display(),
            "path not found in any ancestor"
        ),
    }
    found
}

/// Searches upward from the current directory for `relative`.
pub fn try_find_upwards(relative: impl AsRef<Path>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    try_find_upwards_from(cwd, relative)
}

/// Searches upward from the directory containing the running executable.
///
/// Useful for fixtures copied next to a test binary. Returns `None` when the
/// executable location cannot be determined.
pub fn try_find_upwards_from_executable(relative: impl AsRef<Path>) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?;
    try_find_upwards_from(dir, relative)
}

/// Like [`try_find_upwards_from`], but returns [`PathError::NotFound`] when
/// nothing matches.
pub fn find_upwards_from(base: impl AsRef<Path>, relative: impl AsRef<Path>) -> PathResult<PathBuf> {
    let relative = relative.as_ref();
    try_find_upwards_from(base, relative).ok_or_else(|| PathError::not_found(relative))
}

/// Like [`try_find_upwards`], but returns an error when nothing matches.
pub fn find_upwards(relative: impl AsRef<Path>) -> PathResult<PathBuf> {
    let cwd = std::env::current_dir()?;
    find_upwards_from(cwd, relative)
}

/// Like [`try_find_upwards_from_executable`], but returns an error when
/// nothing matches.
pub fn find_upwards_from_executable(relative: impl AsRef<Path>) -> PathResult<PathBuf> {
    let relative = relative.as_ref();
    try_find_upwards_from_executable(relative).ok_or_else(|| PathError::not_found(relative))
}
