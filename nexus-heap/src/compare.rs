//! Ordering capability used by the heap.
//!
//! A [`Compare`] defines a total order over element handles. The heap keeps
//! the smallest element at the root, so a max-heap is a min-heap with an
//! inverted comparator.

use core::cmp::Ordering;

/// A total order over `T`.
///
/// `compare(a, b) == Less` means `a` sorts before `b` and rises towards the
/// root. The order must be consistent for as long as the elements live in a
/// heap; changing an element's key without calling
/// [`Heap::reprioritize`](crate::Heap::reprioritize) silently breaks heap
/// order.
///
/// Any `Fn(&T, &T) -> Ordering` is a comparator:
///
/// ```
/// use nexus_heap::Heap;
///
/// // Max-heap by inverting the comparator.
/// let mut heap = Heap::new(|a: &u32, b: &u32| b.cmp(a));
/// heap.insert(1);
/// heap.insert(9);
/// heap.insert(4);
/// assert_eq!(heap.shift(), Some(9));
/// ```
pub trait Compare<T: ?Sized> {
    /// Compares two handles.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns `true` if `a` sorts strictly before `b`.
    #[inline]
    fn lt(&self, a: &T, b: &T) -> bool {
        self.compare(a, b).is_lt()
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Comparator using `T`'s own [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}
