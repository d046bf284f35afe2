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

//! All-or-failed aggregation.

/// Maps every item and returns either all successes or all failures.
///
/// Returns `Ok` with every mapped value, in input order, when no item
/// fails. As soon as one item fails the successes are discarded and the
/// result is `Err` with every failure, in input order. All items are
/// visited either way, so the failure list is complete.
///
/// # Examples
///
/// ```
/// use testbed_perf::aggregate::all_or_failed;
///
/// let ok = all_or_failed([1, 2, 3], |n| Ok::<_, String>(n * 10));
/// assert_eq!(ok, Ok(vec![10, 20, 30]));
///
/// let failed = all_or_failed([1, -2, 3, -4], |n| if n > 0 { Ok(n) } else { Err(n) });
/// assert_eq!(failed, Err(vec![-2, -4]));
/// ```
pub fn all_or_failed<I, T, E, F>(items: I, mut f: F) -> Result<Vec<T>, Vec<E>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<T, E>,
{
    let mut passed = Vec::new();
    let mut failed = Vec::new();

    for item in items {
        match f(item) {
            Ok(value) if failed.is_empty() => passed.push(value),
            Ok(_) => {}
            Err(error) => {
                if failed.is_empty() {
                    passed.clear();
                }
                failed.push(error);
            }
        }
    }

    if failed.is_empty() {
        Ok(passed)
    } else {
        Err(failed)
    }
}
