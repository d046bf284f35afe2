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

//! A recording compiler front-end for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};
use testbed_compile::{
    Compilation, CompilationOptions, CompileError, CompileResult, Compiler, LoadedModule,
    MetadataReference,
};

/// Metadata token. Clones share one allocation so identity can be checked.
#[derive(Debug, Clone)]
pub struct Token(Arc<String>);

impl Token {
    pub fn new(display: impl Into<String>) -> Self {
        Self(Arc::new(display.into()))
    }

    pub fn same_instance(&self, other: &Token) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl MetadataReference for Token {
    fn display(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug)]
pub struct RecordedCompilation {
    pub name: String,
    pub trees: Vec<Tree>,
    pub references: Vec<Token>,
    pub options: CompilationOptions,
    token: Token,
}

impl RecordedCompilation {
    pub fn reference_displays(&self) -> Vec<&str> {
        self.references.iter().map(|r| r.display()).collect()
    }
}

impl Compilation for RecordedCompilation {
    type Metadata = Token;

    fn name(&self) -> &str {
        &self.name
    }

    fn to_metadata_reference(&self) -> Token {
        self.token.clone()
    }
}

/// Front-end that records every compilation it creates.
///
/// Sources containing `#error` fail to parse. `fail_next` makes the next
/// `n` compilations fail.
#[derive(Debug, Default)]
pub struct RecordingCompiler {
    modules: Vec<LoadedModule>,
    compilations: AtomicUsize,
    failures_remaining: AtomicUsize,
    names: Mutex<Vec<String>>,
}

impl RecordingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modules(modules: Vec<LoadedModule>) -> Self {
        Self {
            modules,
            ..Self::default()
        }
    }

    pub fn fail_next(&self, count: usize) {
        self.failures_remaining.store(count, Ordering::SeqCst);
    }

    /// Number of compilations attempted, including failed ones.
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::SeqCst)
    }

    pub fn compiled_names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

impl Compiler for RecordingCompiler {
    const SOURCE_EXTENSION: &'static str = "src";

    type Metadata = Token;
    type SyntaxTree = Tree;
    type Compilation = RecordedCompilation;

    fn parse_text(&self, text: &str, path: &Path) -> CompileResult<Tree> {
        if text.contains("#error") {
            return Err(CompileError::frontend(format!(
                "{}: #error directive",
                path.display()
            )));
        }
        Ok(Tree {
            path: path.to_path_buf(),
            text: text.to_string(),
        })
    }

    fn metadata_from_file(&self, path: &Path) -> CompileResult<Token> {
        Ok(Token::new(path.display().to_string()))
    }

    fn loaded_modules(&self) -> Vec<LoadedModule> {
        self.modules.clone()
    }

    fn create_compilation(
        &self,
        name: &str,
        trees: Vec<Tree>,
        references: Vec<Token>,
        options: &CompilationOptions,
    ) -> CompileResult<RecordedCompilation> {
        self.compilations.fetch_add(1, Ordering::SeqCst);
        self.names.lock().unwrap().push(name.to_string());

        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(CompileError::frontend(format!("{} failed to compile", name)));
        }

        Ok(RecordedCompilation {
            name: name.to_string(),
            trees,
            references,
            options: *options,
            token: Token::new(format!("{}.lib", name)),
        })
    }
}

/// Installs a test subscriber once; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Writes `files` (relative path, contents) under a fresh temp dir.
pub fn source_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    write_files(dir.path(), files);
    dir
}

pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        fs::write(&path, contents).expect("Failed to write fixture file");
    }
}

/// Recursive scan with no exclusions, used as the reference result.
pub fn scan(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).expect("Failed to read dir") {
            let path = entry.expect("Failed to read entry").path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == extension) {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}
