//! Heap configuration.

use crate::block::BlockVec;
use crate::compare::Compare;
use crate::error::HeapError;
use crate::heap::Heap;

/// Default resize granularity, in elements.
pub const DEFAULT_BLOCK_SIZE: usize = 128;

/// Builder for [`Heap`].
///
/// # Example
///
/// ```
/// use nexus_heap::{HeapBuilder, Natural};
///
/// let mut heap = HeapBuilder::default()
///     .block_size(16)
///     .capacity(40)
///     .build(Natural)?;
/// assert_eq!(heap.capacity(), 48);
///
/// heap.insert(3u32);
/// assert_eq!(heap.block_size(), 16);
/// # Ok::<(), nexus_heap::HeapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct HeapBuilder {
    block_size: usize,
    capacity: Option<usize>,
}

impl Default for HeapBuilder {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            capacity: None,
        }
    }
}

impl HeapBuilder {
    /// Resize granularity. Storage grows and shrinks in multiples of this
    /// many elements. Default: 128.
    pub fn block_size(mut self, elements: usize) -> Self {
        self.block_size = elements;
        self
    }

    /// Pre-allocate room for at least this many elements. The heap still
    /// grows beyond this and shrinks back down to one block when drained.
    pub fn capacity(mut self, elements: usize) -> Self {
        self.capacity = Some(elements);
        self
    }

    /// Builds an empty heap.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::ZeroBlockSize`] if the block size is zero.
    pub fn build<T, C: Compare<T>>(self, cmp: C) -> Result<Heap<T, C>, HeapError> {
        self.validate()?;
        let slots = BlockVec::with_capacity(self.block_size, self.capacity.unwrap_or(0));
        Ok(Heap::from_storage(slots, cmp))
    }

    /// Builds a heap from `elements` in O(n), like [`Heap::build`].
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::ZeroBlockSize`] if the block size is zero.
    pub fn build_from<T, C: Compare<T>>(
        self,
        cmp: C,
        elements: Vec<T>,
    ) -> Result<Heap<T, C>, HeapError> {
        self.validate()?;
        let slots = BlockVec::from_vec(self.block_size, elements, self.capacity.unwrap_or(0));
        Ok(Heap::from_storage(slots, cmp))
    }

    fn validate(&self) -> Result<(), HeapError> {
        if self.block_size == 0 {
            return Err(HeapError::ZeroBlockSize);
        }
        Ok(())
    }
}
