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

//! Scoped "set a value, restore it on exit" guard.
//!
//! [`TemporarilySet`] reads the current value through a getter, applies a
//! temporary value through a setter, and puts the original back when it is
//! dropped or explicitly restored. It is meant for global or static
//! settings that a test needs to change for a limited scope.
//!
//! The guard does no locking. If the guarded value is shared between
//! threads, callers must synchronize access themselves.
//!
//! # Examples
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use testbed::temporarily;
//!
//! static LIMIT: AtomicUsize = AtomicUsize::new(5);
//!
//! {
//!     let _guard = temporarily::set(
//!         10,
//!         |v| LIMIT.store(v, Ordering::SeqCst),
//!         || LIMIT.load(Ordering::SeqCst),
//!     );
//!     assert_eq!(LIMIT.load(Ordering::SeqCst), 10);
//! }
//! assert_eq!(LIMIT.load(Ordering::SeqCst), 5);
//! ```

use tracing::trace;

/// Holds the original value of a temporarily changed setting and restores
/// it exactly once.
#[must_use = "the original value is restored as soon as the guard is dropped"]
pub struct TemporarilySet<T, S>
where
    S: FnMut(T),
{
    original: Option<T>,
    setter: S,
}

impl<T, S> TemporarilySet<T, S>
where
    S: FnMut(T),
{
    /// Captures the current value with `getter`, then applies `temporary`
    /// with `setter`.
    pub fn new<G>(temporary: T, mut setter: S, getter: G) -> Self
    where
        G: FnOnce() -> T,
    {
        let original = getter();
        setter(temporary);
        trace!("applied temporary value");
        Self {
            original: Some(original),
            setter,
        }
    }

    /// The value that will be restored, or `None` once restored.
    pub fn original(&self) -> Option<&T> {
        self.original.as_ref()
    }

    /// True once the original value has been put back.
    pub fn is_restored(&self) -> bool {
        self.original.is_none()
    }

    /// Restores the original value. Calls after the first are no-ops.
    pub fn restore(&mut self) {
        if let Some(original) = self.original.take() {
            (self.setter)(original);
            trace!("restored original value");
        }
    }
}

impl<T, S> Drop for TemporarilySet<T, S>
where
    S: FnMut(T),
{
    fn drop(&mut self) {
        self.restore();
    }
}

impl<T: std::fmt::Debug, S: FnMut(T)> std::fmt::Debug for TemporarilySet<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporarilySet")
            .field("original", &self.original)
            .finish_non_exhaustive()
    }
}

/// Creates a [`TemporarilySet`] guard.
///
/// Shorthand for [`TemporarilySet::new`].
pub fn set<T, S, G>(temporary: T, setter: S, getter: G) -> TemporarilySet<T, S>
where
    S: FnMut(T),
    G: FnOnce() -> T,
{
    TemporarilySet::new(temporary, setter, getter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_applies_temporary_and_restores_on_drop() {
        let state = Cell::new(5);
        {
            let guard = set(10, |v| state.set(v), || state.get());
            assert_eq!(state.get(), 10);
            assert_eq!(guard.original(), Some(&5));
        }
        assert_eq!(state.get(), 5);
    }

    #[test]
    fn test_restore_is_idempotent() {
        let calls = RefCell::new(Vec::new());
        let value = Cell::new("original");

        let mut guard = set(
            "temporary",
            |v| {
                calls.borrow_mut().push(v);
                value.set(v);
            },
            || value.get(),
        );
        guard.restore();
        guard.restore();
        assert!(guard.is_restored());
        assert_eq!(guard.original(), None);
        drop(guard);

        assert_eq!(value.get(), "original");
        assert_eq!(*calls.borrow(), vec!["temporary", "original"]);
    }

    #[test]
    fn test_getter_called_once() {
        let state = Cell::new(1);
        let reads = Cell::new(0);
        {
            let _guard = set(
                2,
                |v| state.set(v),
                || {
                    reads.set(reads.get() + 1);
                    state.get()
                },
            );
        }
        assert_eq!(reads.get(), 1);
        assert_eq!(state.get(), 1);
    }

    #[test]
    fn test_owned_values() {
        let state = RefCell::new(String::from("en-US"));
        {
            let _guard = set(
                String::from("nl-NL"),
                |v| *state.borrow_mut() = v,
                || state.borrow().clone(),
            );
            assert_eq!(*state.borrow(), "nl-NL");
        }
        assert_eq!(*state.borrow(), "en-US");
    }

    #[test]
    fn test_nested_guards_unwind_in_order() {
        let state = Cell::new(0);
        {
            let _outer = set(1, |v| state.set(v), || state.get());
            {
                let _inner = set(2, |v| state.set(v), || state.get());
                assert_eq!(state.get(), 2);
            }
            assert_eq!(state.get(), 1);
        }
        assert_eq!(state.get(), 0);
    }
}
