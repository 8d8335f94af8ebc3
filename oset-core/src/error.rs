//! Error types shared by the ordered-set workspace.
//!
//! The library reports absence or non-action through sentinel returns
//! (`bool`, `Option`, enum variants) everywhere it can. The one operation
//! with a real structural precondition — joining two trees that are not
//! known to be disjoint — raises [`OverlapError`] instead.

use alloc::string::String;
use thiserror::Error;

/// Raised by `AVLTree::join_trees` when the two operand trees are not
/// provably disjoint under the separating key (or, for the keyless `join2`
/// form, under each other).
///
/// Both variants carry already-stringified operands so the error can be
/// constructed and displayed without requiring `T: Display`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlapError {
    /// Raised by the keyed form of `join_trees`.
    #[error(
        "Cannot join 2 overlapping trees. The key \"{key}\" must be greater than \"{lower_bound}\" and lower than \"{upper_bound}\" based on the comparator provided"
    )]
    WithKey {
        /// The join key, stringified.
        key: String,
        /// The stringified highest value of the lower tree.
        lower_bound: String,
        /// The stringified lowest value of the upper tree.
        upper_bound: String,
    },

    /// Raised by the keyless form of `join_trees` (equivalent to `join2`).
    #[error(
        "Cannot join 2 overlapping trees. The lowerbound of \"{lower_bound}\" must be less than the upperbound of \"{upper_bound}\""
    )]
    WithoutKey {
        /// The stringified highest value of the lower tree.
        lower_bound: String,
        /// The stringified lowest value of the upper tree.
        upper_bound: String,
    },
}

impl OverlapError {
    /// Constructs the error for `join_trees` called with a separating key.
    pub fn with_key(key: String, lower_bound: String, upper_bound: String) -> Self {
        OverlapError::WithKey {
            key,
            lower_bound,
            upper_bound,
        }
    }

    /// Constructs the error for the keyless form (equivalent to `join2`).
    pub fn without_key(lower_bound: String, upper_bound: String) -> Self {
        OverlapError::WithoutKey {
            lower_bound,
            upper_bound,
        }
    }
}

/// A specialized `Result` type for the one fallible entry point in this
/// workspace (`AVLTree::join_trees`).
pub type Result<T> = core::result::Result<T, OverlapError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_with_key() {
        let err = OverlapError::with_key("8".to_string(), "10".to_string(), "7".to_string());
        assert_eq!(
            err.to_string(),
            "Cannot join 2 overlapping trees. The key \"8\" must be greater than \"10\" and lower than \"7\" based on the comparator provided"
        );
    }

    #[test]
    fn display_without_key() {
        let err = OverlapError::without_key("10".to_string(), "7".to_string());
        assert_eq!(
            err.to_string(),
            "Cannot join 2 overlapping trees. The lowerbound of \"10\" must be less than the upperbound of \"7\""
        );
    }
}
