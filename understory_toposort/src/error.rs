// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while building or draining a topological ordering.

use core::fmt;

/// Error returned when a topological ordering cannot be completed.
///
/// Errors are reported lazily: the iterator yields `Some(Err(_))` on the pull
/// that discovers the problem and is exhausted afterwards. Graph construction
/// happens on the first pull, so [`NullDependencies`](Self::NullDependencies)
/// and [`DependencyNotInSource`](Self::DependencyNotInSource) always surface
/// there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortError {
    /// The dependency function reported no dependency sequence at all (as
    /// opposed to an empty one).
    ///
    /// Only [`Fallible`](crate::Fallible) dependency functions can do this.
    NullDependencies {
        /// Source index of the element whose dependencies were missing.
        index: usize,
    },
    /// An element depends on a value that matches no element of the source
    /// under the ordering's equality relation.
    DependencyNotInSource {
        /// Source index of the element that declared the dependency.
        index: usize,
    },
    /// The remaining elements depend on each other; no element is eligible.
    CycleDetected {
        /// Number of elements that could not be emitted.
        remaining: usize,
    },
}

impl SortError {
    fn reason(&self) -> &'static str {
        match self {
            Self::NullDependencies { .. } => "dependency function returned no dependencies",
            Self::DependencyNotInSource { .. } => {
                "an element has a dependency that is not in source"
            }
            Self::CycleDetected { .. } => "dependency cycle detected",
        }
    }
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to complete topological sort: {}", self.reason())?;
        match self {
            Self::NullDependencies { index } | Self::DependencyNotInSource { index } => {
                write!(f, " (element at index {index})")
            }
            Self::CycleDetected { remaining } => write!(f, " ({remaining} elements remaining)"),
        }
    }
}

impl core::error::Error for SortError {}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn display_names_the_failure() {
        let err = SortError::CycleDetected { remaining: 3 };
        assert_eq!(
            err.to_string(),
            "unable to complete topological sort: dependency cycle detected (3 elements remaining)"
        );

        let err = SortError::DependencyNotInSource { index: 2 };
        assert!(
            err.to_string()
                .contains("an element has a dependency that is not in source"),
            "unexpected message: {err}"
        );

        let err = SortError::NullDependencies { index: 0 };
        assert!(
            err.to_string().ends_with("(element at index 0)"),
            "unexpected message: {err}"
        );
    }
}
