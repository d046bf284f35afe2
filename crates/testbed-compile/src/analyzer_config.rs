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

//! Analyzer configuration for tests.
//!
//! Analyzers read string options such as `build_property.RootNamespace`.
//! Tests usually only need global options, so
//! [`TestAnalyzerConfigOptionsProvider`] serves a fixed global set and
//! empty per-file options.

use std::collections::HashMap;
use std::path::Path;

/// Read-only key/value options consumed by analyzers.
pub trait AnalyzerConfigOptions {
    /// Looks up `key`. Keys are case-sensitive.
    fn get(&self, key: &str) -> Option<&str>;
}

/// Options backed by a `HashMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryAnalyzerConfigOptions {
    options: HashMap<String, String>,
}

impl DictionaryAnalyzerConfigOptions {
    pub fn new(options: HashMap<String, String>) -> Self {
        Self { options }
    }

    /// Adds an option, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl AnalyzerConfigOptions for DictionaryAnalyzerConfigOptions {
    fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for DictionaryAnalyzerConfigOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Supplies analyzer options globally, per syntax tree and per additional
/// text file.
pub trait AnalyzerConfigOptionsProvider {
    type Options: AnalyzerConfigOptions;

    fn global_options(&self) -> &Self::Options;

    fn tree_options<T: ?Sized>(&self, tree: &T) -> &Self::Options;

    fn additional_text_options(&self, path: &Path) -> &Self::Options;
}

/// Provider with fixed global options and no per-file options.
#[derive(Debug, Clone, Default)]
pub struct TestAnalyzerConfigOptionsProvider {
    global: DictionaryAnalyzerConfigOptions,
    empty: DictionaryAnalyzerConfigOptions,
}

impl TestAnalyzerConfigOptionsProvider {
    pub fn new(global: DictionaryAnalyzerConfigOptions) -> Self {
        Self {
            global,
            empty: DictionaryAnalyzerConfigOptions::default(),
        }
    }
}

impl AnalyzerConfigOptionsProvider for TestAnalyzerConfigOptionsProvider {
    type Options = DictionaryAnalyzerConfigOptions;

    fn global_options(&self) -> &Self::Options {
        &self.global
    }

    fn tree_options<T: ?Sized>(&self, _tree: &T) -> &Self::Options {
        &self.empty
    }

    fn additional_text_options(&self, _path: &Path) -> &Self::Options {
        &self.empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_lookup_is_case_sensitive() {
        let options = DictionaryAnalyzerConfigOptions::default()
            .with("build_property.RootNamespace", "Fixtures");

        assert_eq!(options.get("build_property.RootNamespace"), Some("Fixtures"));
        assert_eq!(options.get("build_property.rootnamespace"), None);
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn test_dictionary_from_iter() {
        let options: DictionaryAnalyzerConfigOptions =
            [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(options.get("a"), Some("1"));
        assert_eq!(options.get("b"), Some("2"));
        assert!(!options.is_empty());
    }

    #[test]
    fn test_provider_serves_global_options() {
        let provider = TestAnalyzerConfigOptionsProvider::new(
            DictionaryAnalyzerConfigOptions::default().with("severity", "error"),
        );
        assert_eq!(provider.global_options().get("severity"), Some("error"));
    }

    #[test]
    fn test_provider_per_file_options_are_empty() {
        let provider = TestAnalyzerConfigOptionsProvider::new(
            DictionaryAnalyzerConfigOptions::default().with("severity", "error"),
        );
        let tree = String::from("class A {}");

        assert!(provider.tree_options(&tree).is_empty());
        assert!(provider.tree_options("inline source").is_empty());
        assert!(provider
            .additional_text_options(Path::new("settings.json"))
            .is_empty());
    }
}
