//! Self-verification of heap invariants.
//!
//! O(n) diagnostics for tests and debugging. Nothing in the heap's own
//! control flow depends on them.

use crate::compare::Compare;
use crate::error::Violation;
use crate::heap::Heap;

impl<T, C: Compare<T>> Heap<T, C> {
    /// Checks heap order and, if positions are tracked, every position cell.
    ///
    /// Every slot except the root is compared against its parent. Returns the
    /// first violation found, scanning slots in array order.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::Position`] if an element's cell disagrees with its
    /// slot, or [`Violation::Order`] if a child sorts before its parent.
    pub fn verify(&self) -> Result<(), Violation> {
        let slots = self.as_slice();
        let accessor = self.accessor();
        let cmp = self.comparator();

        for (index, elem) in slots.iter().enumerate() {
            if let Some(accessor) = accessor {
                let recorded = accessor(elem).get();
                if recorded != Some(index) {
                    return Err(Violation::Position { index, recorded });
                }
            }

            if index > 0 {
                let parent = (index - 1) / 2;
                if cmp.lt(elem, &slots[parent]) {
                    return Err(Violation::Order {
                        parent,
                        child: index,
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns `true` if [`verify`](Self::verify) finds nothing wrong.
    #[doc(alias = "check_properties")]
    pub fn check_invariants(&self) -> bool {
        self.verify().is_ok()
    }
}
