//! Block-granular backing storage.
//!
//! Capacity is always a positive multiple of the block size `B`. Growth and
//! shrinkage happen in whole blocks, and only on the thresholds below, so the
//! allocation pattern of a heap is reproducible from its length history:
//!
//! - grow when a push would exceed capacity
//! - shrink after a removal once more than one block is unused
//!
//! Resizing never reorders slots.

use std::collections::TryReserveError;

use log::trace;

/// Vector whose capacity moves in whole blocks.
pub(crate) struct BlockVec<T> {
    slots: Vec<T>,
    /// Logical capacity. The allocator may hand out more; the policy only
    /// ever looks at this value.
    capacity: usize,
    block: usize,
}

impl<T> BlockVec<T> {
    /// Creates storage with one block, or enough blocks for `hint` elements.
    ///
    /// `block` must be non-zero.
    pub(crate) fn with_capacity(block: usize, hint: usize) -> Self {
        debug_assert!(block > 0);
        let capacity = blocks_for(hint, block);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            block,
        }
    }

    /// Adopts `slots` in their current order, sized by the resize rule for
    /// the larger of their length and `hint`.
    pub(crate) fn from_vec(block: usize, mut slots: Vec<T>, hint: usize) -> Self {
        debug_assert!(block > 0);
        let capacity = blocks_for(slots.len().max(hint), block);
        if slots.capacity() < capacity {
            slots.reserve_exact(capacity - slots.len());
        } else {
            slots.shrink_to(capacity);
        }
        Self {
            slots,
            capacity,
            block,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn block(&self) -> usize {
        self.block
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.slots
    }

    /// Appends `value`, growing by whole blocks first if needed.
    ///
    /// Allocation failure aborts, like any `Vec` growth.
    pub(crate) fn push(&mut self, value: T) {
        if self.slots.len() + 1 > self.capacity {
            let target = blocks_for(self.slots.len() + 1, self.block);
            self.slots.reserve_exact(target - self.slots.len());
            self.note_resize(target);
        }
        self.slots.push(value);
    }

    /// Appends `value`, handing it back if growing the storage fails.
    pub(crate) fn try_push(&mut self, value: T) -> Result<(), (T, TryReserveError)> {
        if self.slots.len() + 1 > self.capacity {
            let target = blocks_for(self.slots.len() + 1, self.block);
            if let Err(err) = self.slots.try_reserve_exact(target - self.slots.len()) {
                return Err((value, err));
            }
            self.note_resize(target);
        }
        self.slots.push(value);
        Ok(())
    }

    /// Removes slot `pos`, moving the last slot into its place.
    ///
    /// `pos` must be in bounds.
    #[inline]
    pub(crate) fn swap_remove(&mut self, pos: usize) -> T {
        self.slots.swap_remove(pos)
    }

    #[inline]
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Releases whole blocks once more than one block sits unused.
    pub(crate) fn shrink_if_slack(&mut self) {
        if self.capacity - self.slots.len() > self.block {
            let target = blocks_for(self.slots.len(), self.block);
            self.slots.shrink_to(target);
            self.note_resize(target);
        }
    }

    /// Takes every slot in array order, leaving one empty block behind.
    pub(crate) fn take(&mut self) -> std::vec::IntoIter<T> {
        if self.capacity != self.block {
            self.note_resize(self.block);
        }
        std::mem::replace(&mut self.slots, Vec::with_capacity(self.block)).into_iter()
    }

    fn note_resize(&mut self, target: usize) {
        trace!(
            "heap storage resize: {} -> {} slots (len {}, block {})",
            self.capacity,
            target,
            self.slots.len(),
            self.block
        );
        self.capacity = target;
    }
}

/// Next multiple of `block` strictly above `len`.
///
/// Always at least one block, and always leaves room for one more push.
#[inline]
pub(crate) fn blocks_for(len: usize, block: usize) -> usize {
    len - len % block + block
}
