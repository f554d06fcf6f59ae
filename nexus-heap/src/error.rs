//! Error types.

use core::fmt;
use std::collections::TryReserveError;

/// Error during heap construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// Block size is zero. Storage grows in whole blocks, so a block must
    /// hold at least one element.
    ZeroBlockSize,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::ZeroBlockSize => write!(f, "block size cannot be zero"),
        }
    }
}

impl std::error::Error for HeapError {}

/// Error returned when growing the heap's storage fails.
///
/// Contains the element that could not be inserted, allowing recovery.
#[derive(Debug, Clone)]
pub struct AllocError<T> {
    value: T,
    source: TryReserveError,
}

impl<T> AllocError<T> {
    pub(crate) fn new(value: T, source: TryReserveError) -> Self {
        Self { value, source }
    }

    /// Returns the element that could not be inserted.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for AllocError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "heap storage allocation failed: {}", self.source)
    }
}

impl<T: fmt::Debug> std::error::Error for AllocError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// The first invariant break found by [`Heap::verify`](crate::Heap::verify).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// The element at `child` sorts strictly before its parent.
    Order {
        /// Slot of the parent.
        parent: usize,
        /// Slot of the out-of-order child.
        child: usize,
    },
    /// The element at `index` has a position cell that disagrees with its slot.
    Position {
        /// Slot the element actually occupies.
        index: usize,
        /// Slot recorded in its position cell.
        recorded: Option<usize>,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Order { parent, child } => {
                write!(f, "heap order broken: slot {child} sorts before parent {parent}")
            }
            Violation::Position {
                index,
                recorded: Some(recorded),
            } => write!(f, "position cell of slot {index} records {recorded}"),
            Violation::Position {
                index,
                recorded: None,
            } => write!(f, "position cell of slot {index} is not set"),
        }
    }
}

impl std::error::Error for Violation {}
