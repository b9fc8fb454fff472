//! Error types for container operations.
//!
//! Most operations cannot fail: out-of-range removals, pops past the end,
//! and absent keys are silent no-ops. The few operations that would
//! otherwise have to invent a result report a [`CollectionError`] instead.

/// Represents the failures a container operation can report.
///
/// # Examples
///
/// ```rust
/// use tablekit::{CollectionError, List, list};
///
/// let error = list::reduce(&List::new(), |total, _, _| total, None).unwrap_err();
/// assert_eq!(
///     error,
///     CollectionError::EmptyReduction { operation: "list::reduce" }
/// );
/// assert_eq!(
///     format!("{error}"),
///     "list::reduce: cannot reduce an empty list without an initial value"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An empty list was reduced without an initial value.
    EmptyReduction {
        /// The operation that failed.
        operation: &'static str,
    },
    /// A write addressed a position the list does not have.
    IndexOutOfBounds {
        /// The operation that failed.
        operation: &'static str,
        /// The index as given by the caller, before normalization.
        index: i64,
        /// The length of the list at the time of the call.
        length: usize,
    },
}

impl std::fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyReduction { operation } => write!(
                formatter,
                "{operation}: cannot reduce an empty list without an initial value"
            ),
            Self::IndexOutOfBounds {
                operation,
                index,
                length,
            } => write!(
                formatter,
                "{operation}: index {index} is out of bounds for a list of length {length}"
            ),
        }
    }
}

impl std::error::Error for CollectionError {}
