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

//! Integration tests for file and project references.

mod common;

use common::{init_tracing, source_tree, RecordingCompiler, Token};
use std::sync::Arc;
use std::thread;
use testbed_compile::{
    CompileError, FileReference, MetadataReference, Project, ProjectReference, Reference,
    References, SourceProject,
};

fn shared_project(compiler: &Arc<RecordingCompiler>) -> (tempfile::TempDir, SourceProject<RecordingCompiler>) {
    init_tracing();
    let dir = source_tree(&[("Shared/S.src", "shared")]);
    let project = SourceProject::builder(compiler.clone(), dir.path().join("Shared"))
        .build()
        .expect("Failed to build project");
    (dir, project)
}

#[test]
fn test_file_reference_resolves_to_loaded_metadata() {
    let compiler = RecordingCompiler::new();
    let reference = FileReference::new(&compiler, "/deps/Json.lib").unwrap();

    assert_eq!(reference.path(), std::path::Path::new("/deps/Json.lib"));
    let first = reference.resolve().unwrap();
    let second = reference.resolve().unwrap();
    assert_eq!(first.display(), "/deps/Json.lib");
    assert!(first.same_instance(&second));
}

#[test]
fn test_project_reference_compiles_once() {
    let compiler = Arc::new(RecordingCompiler::new());
    let (_dir, project) = shared_project(&compiler);
    let reference = ProjectReference::new(project);

    assert!(!reference.is_resolved());
    let first = reference.resolve().unwrap();
    let second = reference.resolve().unwrap();

    assert!(reference.is_resolved());
    assert!(first.same_instance(&second));
    assert_eq!(first.display(), "Shared.lib");
    assert_eq!(compiler.compilations(), 1);
}

#[test]
fn test_project_reference_is_lazy() {
    let compiler = Arc::new(RecordingCompiler::new());
    let (_dir, project) = shared_project(&compiler);

    let _reference = ProjectReference::new(project);
    assert_eq!(compiler.compilations(), 0);
}

#[test]
fn test_failed_resolution_is_retried() {
    let compiler = Arc::new(RecordingCompiler::new());
    let (_dir, project) = shared_project(&compiler);
    let reference = ProjectReference::new(project);

    compiler.fail_next(1);
    assert!(matches!(reference.resolve(), Err(CompileError::Frontend(_))));
    assert!(!reference.is_resolved());

    let token = reference.resolve().unwrap();
    assert_eq!(token.display(), "Shared.lib");
    assert_eq!(compiler.compilations(), 2);

    // Success is memoized from here on.
    reference.resolve().unwrap();
    assert_eq!(compiler.compilations(), 2);
}

#[test]
fn test_concurrent_resolution_compiles_once() {
    let compiler = Arc::new(RecordingCompiler::new());
    let (_dir, project) = shared_project(&compiler);
    let reference = ProjectReference::new(project);

    let tokens: Vec<Token> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| reference.resolve().unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(compiler.compilations(), 1);
    assert!(tokens.windows(2).all(|pair| pair[0].same_instance(&pair[1])));
}

#[test]
fn test_shared_project_reference_across_projects() {
    let compiler = Arc::new(RecordingCompiler::new());
    let (_shared_dir, shared) = shared_project(&compiler);
    let shared: Arc<dyn Reference<RecordingCompiler>> = Arc::new(ProjectReference::new(shared));

    let dir = source_tree(&[("App/A.src", "a"), ("Tests/T.src", "t")]);
    let mut app_refs = References::new();
    app_refs.push_shared(shared.clone());
    let mut test_refs = References::new();
    test_refs.push_shared(shared);

    let app = SourceProject::builder(compiler.clone(), dir.path().join("App"))
        .references(app_refs)
        .build()
        .unwrap();
    let tests = SourceProject::builder(compiler.clone(), dir.path().join("Tests"))
        .references(test_refs)
        .build()
        .unwrap();

    app.compile().unwrap();
    tests.compile().unwrap();

    assert_eq!(compiler.compiled_names(), vec!["Shared", "App", "Tests"]);
}

#[test]
fn test_references_preserve_order_and_duplicates() {
    let compiler = RecordingCompiler::new();
    let references = References::new()
        .with(FileReference::new(&compiler, "/b.lib").unwrap())
        .with(FileReference::new(&compiler, "/a.lib").unwrap())
        .with(FileReference::new(&compiler, "/b.lib").unwrap());

    let displays: Vec<String> = references
        .iter()
        .map(|r| r.resolve().unwrap().display().to_string())
        .collect();
    assert_eq!(displays, vec!["/b.lib", "/a.lib", "/b.lib"]);
    assert_eq!(references.clone().len(), 3);
    assert!(References::<RecordingCompiler>::default().is_empty());
}

#[test]
fn test_reference_failure_propagates_through_compile() {
    let compiler = Arc::new(RecordingCompiler::new());
    let (_shared_dir, shared) = shared_project(&compiler);

    let dir = source_tree(&[("App/A.src", "a")]);
    let app = SourceProject::builder(compiler.clone(), dir.path().join("App"))
        .reference(ProjectReference::new(shared))
        .build()
        .unwrap();

    compiler.fail_next(1);
    assert!(app.compile().is_err());
    assert!(app.compile().is_ok());
}
