//! Binary min-heap over caller-supplied handles.
//!
//! The heap stores handles (`&T`, `Rc<T>`, keys, plain values) in a
//! block-allocated array and orders them with a [`Compare`]. With a position
//! accessor installed, every handle's [`Position`](crate::Position) cell
//! tracks its current slot, which makes [`Heap::delete`] and
//! [`Heap::reprioritize`] O(log n).
//!
//! Every slot write goes through `place`, which is the only code that writes
//! position cells.

use core::fmt;
use core::ptr;
use std::slice;

use log::debug;

use crate::block::BlockVec;
use crate::builder::DEFAULT_BLOCK_SIZE;
use crate::compare::{Compare, Natural};
use crate::error::AllocError;
use crate::position::{PositionAccessor, Positioned};

#[inline]
const fn parent(pos: usize) -> usize {
    (pos - 1) / 2
}

#[inline]
const fn left(pos: usize) -> usize {
    2 * pos + 1
}

/// A binary min-heap with optional in-element position tracking.
///
/// # Example
///
/// ```
/// use nexus_heap::{Heap, Natural};
///
/// let mut heap = Heap::new(Natural);
/// assert_eq!(heap.insert(7), 1);
/// assert_eq!(heap.insert(1), 2);
/// assert_eq!(heap.insert(3), 3);
///
/// assert_eq!(heap.min(), Some(&1));
/// assert_eq!(heap.shift(), Some(1));
/// assert_eq!(heap.shift(), Some(3));
/// assert_eq!(heap.shift(), Some(7));
/// assert_eq!(heap.shift(), None);
/// ```
///
/// # Position tracking
///
/// ```
/// use nexus_heap::{Heap, Position, Positioned};
/// use std::cell::Cell;
///
/// struct Order {
///     price: Cell<u64>,
///     pos: Position,
/// }
///
/// impl Positioned for Order {
///     fn position(&self) -> &Position {
///         &self.pos
///     }
/// }
///
/// let orders: Vec<Order> = [40, 10, 30, 20]
///     .into_iter()
///     .map(|p| Order { price: Cell::new(p), pos: Position::new() })
///     .collect();
///
/// let mut heap = Heap::new(|a: &&Order, b: &&Order| a.price.get().cmp(&b.price.get()));
/// heap.track_positions();
/// for order in &orders {
///     heap.insert(order);
/// }
///
/// // Cancel the 30 without scanning.
/// let cancelled = heap.delete(&&orders[2]).unwrap();
/// assert_eq!(cancelled.price.get(), 30);
/// assert!(!orders[2].pos.in_heap());
///
/// // Reprice the 40 to the front.
/// orders[0].price.set(5);
/// heap.reprioritize(&&orders[0]);
/// assert_eq!(heap.min().unwrap().price.get(), 5);
/// assert!(heap.check_invariants());
/// ```
pub struct Heap<T, C = Natural> {
    slots: BlockVec<T>,
    cmp: C,
    accessor: Option<PositionAccessor<T>>,
}

impl<T: Ord> Default for Heap<T, Natural> {
    fn default() -> Self {
        Self::new(Natural)
    }
}

impl<T, C: Compare<T>> Heap<T, C> {
    /// Creates an empty heap holding one block of capacity.
    pub fn new(cmp: C) -> Self {
        Self::from_storage(BlockVec::with_capacity(DEFAULT_BLOCK_SIZE, 0), cmp)
    }

    /// Creates a heap containing exactly `elements`, in O(n).
    ///
    /// The elements are adopted in their given order and then heapified
    /// bottom-up; they are not inserted one at a time.
    ///
    /// ```
    /// use nexus_heap::{Heap, Natural};
    ///
    /// let heap = Heap::build(Natural, vec![5, 3, 8, 1, 9, 2]);
    /// assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 5, 8, 9]);
    /// ```
    pub fn build(cmp: C, elements: Vec<T>) -> Self {
        Self::from_storage(BlockVec::from_vec(DEFAULT_BLOCK_SIZE, elements, 0), cmp)
    }

    pub(crate) fn from_storage(slots: BlockVec<T>, cmp: C) -> Self {
        let mut heap = Self {
            slots,
            cmp,
            accessor: None,
        };
        heap.build_heap();
        heap
    }

    /// Returns the number of elements in the heap.
    #[doc(alias = "size")]
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.len() == 0
    }

    /// Returns the number of slots currently allocated by the resize policy.
    ///
    /// Always a positive multiple of [`block_size`](Self::block_size).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the resize granularity.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.slots.block()
    }

    /// Returns `true` if a position accessor is installed.
    #[inline]
    pub fn tracks_positions(&self) -> bool {
        self.accessor.is_some()
    }

    /// Returns the minimum element without removing it.
    ///
    /// Returns `None` if the heap is empty.
    #[doc(alias = "peek")]
    #[inline]
    pub fn min(&self) -> Option<&T> {
        self.slots.as_slice().first()
    }

    /// Iterates over the elements in array order, not sorted order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.slots.as_slice().iter()
    }

    // ========================================================================
    // Insert operations
    // ========================================================================

    /// Inserts an element and returns the new length.
    ///
    /// Grows storage by one block if it is full. Allocation failure is fatal;
    /// use [`try_insert`](Self::try_insert) to recover from it instead.
    #[doc(alias = "push")]
    pub fn insert(&mut self, value: T) -> usize {
        self.slots.push(value);
        self.settle_new()
    }

    /// Inserts an element, handing it back if storage cannot grow.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] holding `value` if the allocator refuses the
    /// next block. The heap is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<usize, AllocError<T>> {
        self.slots
            .try_push(value)
            .map_err(|(value, err)| AllocError::new(value, err))?;
        Ok(self.settle_new())
    }

    fn settle_new(&mut self) -> usize {
        let pos = self.slots.len() - 1;
        self.place(pos);
        self.sift_up(pos);
        self.slots.len()
    }

    // ========================================================================
    // Remove operations
    // ========================================================================

    /// Removes and returns the minimum element.
    ///
    /// Returns `None` if the heap is empty.
    #[doc(alias = "pop")]
    #[doc(alias = "extract_min")]
    pub fn shift(&mut self) -> Option<T> {
        self.remove_at(0)
    }

    /// Removes the first element, in array order, for which
    /// `matches(element, pattern)` holds. O(n).
    ///
    /// Prefer [`delete`](Self::delete) when positions are tracked.
    ///
    /// ```
    /// use nexus_heap::{Heap, Natural};
    ///
    /// let mut heap = Heap::build(Natural, vec![4, 8, 15, 16, 23, 42]);
    /// assert_eq!(heap.delete_matching(&15, |x, p| x == p), Some(15));
    /// assert_eq!(heap.delete_matching(&99, |x, p| x == p), None);
    /// assert_eq!(heap.len(), 5);
    /// ```
    pub fn delete_matching<P, F>(&mut self, pattern: &P, mut matches: F) -> Option<T>
    where
        P: ?Sized,
        F: FnMut(&T, &P) -> bool,
    {
        let pos = self
            .slots
            .as_slice()
            .iter()
            .position(|elem| matches(elem, pattern))?;
        self.remove_at(pos)
    }

    /// Removes `elem` using its position cell. O(log n).
    ///
    /// Returns the stored handle for `elem`, or `None` if no accessor is
    /// installed or `elem` is not in this heap.
    pub fn delete(&mut self, elem: &T) -> Option<T> {
        let pos = self.locate(elem)?;
        self.remove_at(pos)
    }

    /// Removes every element, in array order, dropping them.
    pub fn clear(&mut self) {
        let accessor = self.accessor;
        for elem in self.slots.take() {
            forget(accessor, &elem);
        }
    }

    /// Consumes the heap, handing each remaining element to `destructor` in
    /// array order.
    ///
    /// ```
    /// use nexus_heap::{Heap, Natural};
    ///
    /// let heap = Heap::build(Natural, vec![String::from("b"), String::from("a")]);
    /// let mut seen = Vec::new();
    /// heap.destroy(|s| seen.push(s));
    /// seen.sort();
    /// assert_eq!(seen, ["a", "b"]);
    /// ```
    pub fn destroy<F>(mut self, mut destructor: F)
    where
        F: FnMut(T),
    {
        let accessor = self.accessor;
        for elem in self.slots.take() {
            forget(accessor, &elem);
            destructor(elem);
        }
    }

    /// Consumes the heap, returning its elements in array order.
    pub fn into_vec(mut self) -> Vec<T> {
        let accessor = self.accessor;
        let elems: Vec<T> = self.slots.take().collect();
        for elem in &elems {
            forget(accessor, elem);
        }
        elems
    }

    /// Consumes the heap, returning its elements in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(elem) = self.shift() {
            sorted.push(elem);
        }
        sorted
    }

    /// Pops minimums while `pred` holds for the current minimum.
    ///
    /// ```
    /// use nexus_heap::{Heap, Natural};
    ///
    /// let mut heap = Heap::build(Natural, vec![7, 1, 5, 3]);
    /// let due: Vec<_> = heap.drain_while(|&x| x < 4).collect();
    /// assert_eq!(due, vec![1, 3]);
    /// assert_eq!(heap.min(), Some(&5));
    /// ```
    pub fn drain_while<F>(&mut self, pred: F) -> DrainWhile<'_, T, C, F>
    where
        F: FnMut(&T) -> bool,
    {
        DrainWhile { heap: self, pred }
    }

    // ========================================================================
    // Position tracking
    // ========================================================================

    /// Installs, replaces, or (with `None`) removes the position accessor.
    ///
    /// A new accessor immediately receives every live element's current slot,
    /// so elements inserted before it was installed are tracked too.
    pub fn install_position_accessor(&mut self, accessor: Option<PositionAccessor<T>>) {
        self.accessor = accessor;
        match accessor {
            Some(accessor) => {
                for (slot, elem) in self.slots.as_slice().iter().enumerate() {
                    accessor(elem).set(slot);
                }
                debug!("heap position accessor installed, {} cells filled", self.len());
            }
            None => debug!("heap position accessor removed"),
        }
    }

    /// Returns the slot `elem` occupies, according to its position cell.
    ///
    /// Returns `None` without an accessor, or if the cell does not lead back
    /// to `elem` (it was removed, or belongs to another heap).
    pub fn position_of(&self, elem: &T) -> Option<usize> {
        self.locate(elem)
    }

    /// Restores heap order around `elem` after its key changed in place.
    ///
    /// Works whether the key rose or fell. Returns the element's new slot, or
    /// `None` (doing nothing) if no accessor is installed or `elem` is not in
    /// this heap.
    #[doc(alias = "hipify")]
    #[doc(alias = "update_key")]
    pub fn reprioritize(&mut self, elem: &T) -> Option<usize> {
        let pos = self.locate(elem)?;
        let accessor = self.accessor?;
        self.restore(pos);
        accessor(elem).get()
    }

    fn locate(&self, elem: &T) -> Option<usize> {
        let accessor = self.accessor?;
        let cell = accessor(elem);
        let pos = cell.get()?;
        match self.slots.as_slice().get(pos) {
            Some(stored) if ptr::eq(accessor(stored), cell) => Some(pos),
            _ => {
                debug!("heap handle rejected: position cell records slot {pos} of another element");
                None
            }
        }
    }

    // ========================================================================
    // Engine
    // ========================================================================

    /// Records `pos` in the position cell of the element now at `pos`.
    #[inline]
    fn place(&self, pos: usize) {
        if let Some(accessor) = self.accessor {
            accessor(&self.slots.as_slice()[pos]).set(pos);
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.place(a);
        self.place(b);
    }

    /// Removes the element at `pos`, backfilling from the last slot.
    fn remove_at(&mut self, pos: usize) -> Option<T> {
        if pos >= self.slots.len() {
            return None;
        }

        let removed = self.slots.swap_remove(pos);
        if pos < self.slots.len() {
            self.place(pos);
            self.restore(pos);
        }
        forget(self.accessor, &removed);
        self.slots.shrink_if_slack();

        Some(removed)
    }

    /// Moves the element at `pos` towards the root while it sorts strictly
    /// before its parent. Returns the number of swaps.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        let mut swaps = 0;
        while pos > 0 {
            let up = parent(pos);
            let slots = self.slots.as_slice();
            if !self.cmp.lt(&slots[pos], &slots[up]) {
                break;
            }
            self.swap(pos, up);
            pos = up;
            swaps += 1;
        }
        swaps
    }

    /// Moves the element at `pos` towards the leaves while its smaller child
    /// sorts strictly before it. Equal children resolve to the left one.
    /// Returns the number of swaps.
    fn sift_down(&mut self, mut pos: usize) -> usize {
        let len = self.slots.len();
        let mut swaps = 0;
        loop {
            let left = left(pos);
            if left >= len {
                break;
            }
            let right = left + 1;
            let slots = self.slots.as_slice();
            let down = if right < len && self.cmp.lt(&slots[right], &slots[left]) {
                right
            } else {
                left
            };
            if !self.cmp.lt(&slots[down], &slots[pos]) {
                break;
            }
            self.swap(pos, down);
            pos = down;
            swaps += 1;
        }
        swaps
    }

    /// Re-establishes order after a single-slot change at `pos`.
    ///
    /// An element that had to rise cannot also have to sink, so sift-down only
    /// runs when sift-up moved nothing.
    fn restore(&mut self, pos: usize) -> usize {
        match self.sift_up(pos) {
            0 => self.sift_down(pos),
            swaps => swaps,
        }
    }

    /// Bottom-up heapify from the last internal node. O(n).
    fn build_heap(&mut self) -> usize {
        let len = self.slots.len();
        if len < 2 {
            return 0;
        }
        (0..len / 2).rev().map(|pos| self.sift_down(pos)).sum()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        self.slots.as_slice()
    }

    pub(crate) fn accessor(&self) -> Option<PositionAccessor<T>> {
        self.accessor
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.cmp
    }
}

impl<T: Positioned, C: Compare<T>> Heap<T, C> {
    /// Installs `T`'s own [`Positioned`] impl as the position accessor.
    pub fn track_positions(&mut self) {
        self.install_position_accessor(Some(<T as Positioned>::position));
    }
}

#[inline]
fn forget<T>(accessor: Option<PositionAccessor<T>>, elem: &T) {
    if let Some(accessor) = accessor {
        accessor(elem).clear();
    }
}

impl<T, C> Drop for Heap<T, C> {
    fn drop(&mut self) {
        if let Some(accessor) = self.accessor {
            for elem in self.slots.as_slice() {
                accessor(elem).clear();
            }
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Heap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("len", &self.slots.len())
            .field("capacity", &self.slots.capacity())
            .field("block_size", &self.slots.block())
            .field("tracks_positions", &self.accessor.is_some())
            .field("slots", &self.slots.as_slice())
            .finish()
    }
}

impl<T, C: Compare<T>> Extend<T> for Heap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<T: Ord> FromIterator<T> for Heap<T, Natural> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build(Natural, iter.into_iter().collect())
    }
}

impl<'a, T, C> IntoIterator for &'a Heap<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.as_slice().iter()
    }
}

/// An iterator that pops minimums while a predicate holds.
///
/// Created by [`Heap::drain_while`].
pub struct DrainWhile<'a, T, C, F>
where
    C: Compare<T>,
    F: FnMut(&T) -> bool,
{
    heap: &'a mut Heap<T, C>,
    pred: F,
}

impl<T, C, F> Iterator for DrainWhile<'_, T, C, F>
where
    C: Compare<T>,
    F: FnMut(&T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let min = self.heap.min()?;
        if (self.pred)(min) {
            self.heap.shift()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use core::cell::Cell;
    use core::cmp::Ordering;

    #[derive(Debug)]
    struct Task {
        priority: Cell<u32>,
        id: u32,
        pos: Position,
    }

    impl Task {
        fn new(priority: u32, id: u32) -> Self {
            Self {
                priority: Cell::new(priority),
                id,
                pos: Position::new(),
            }
        }
    }

    impl Positioned for Task {
        fn position(&self) -> &Position {
            &self.pos
        }
    }

    fn by_priority(a: &&Task, b: &&Task) -> Ordering {
        a.priority.get().cmp(&b.priority.get())
    }

    #[test]
    fn new_is_empty() {
        let heap: Heap<u32> = Heap::default();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(heap.min().is_none());
        assert_eq!(heap.capacity(), DEFAULT_BLOCK_SIZE);
        assert!(!heap.tracks_positions());
    }

    #[test]
    fn insert_then_shift_single() {
        let task = Task::new(5, 1);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();

        assert_eq!(heap.insert(&task), 1);
        assert_eq!(task.pos.get(), Some(0));

        let popped = heap.shift().unwrap();
        assert!(ptr::eq(popped, &task));
        assert!(heap.is_empty());

        // Removed element's cell is cleared.
        assert!(!task.pos.in_heap());
    }

    #[test]
    fn min_heap_order() {
        let tasks = [
            Task::new(10, 1),
            Task::new(1, 2),
            Task::new(5, 3),
            Task::new(3, 4),
        ];
        let mut heap = Heap::new(by_priority);
        for task in &tasks {
            heap.insert(task);
        }

        let order: Vec<u32> = heap.into_sorted_vec().iter().map(|t| t.priority.get()).collect();
        assert_eq!(order, vec![1, 3, 5, 10]);
    }

    #[test]
    fn min_tracks_inserts() {
        let mut heap = Heap::new(Natural);
        heap.insert(7);
        assert_eq!(heap.min(), Some(&7));
        heap.insert(1);
        assert_eq!(heap.min(), Some(&1));
        heap.insert(3);
        assert_eq!(heap.min(), Some(&1));

        assert_eq!(heap.shift(), Some(1));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.shift(), Some(3));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.shift(), Some(7));
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn empty_operations_are_idempotent() {
        let mut heap: Heap<u8> = Heap::default();
        for _ in 0..3 {
            assert_eq!(heap.min(), None);
            assert_eq!(heap.shift(), None);
            assert_eq!(heap.len(), 0);
        }
        assert_eq!(heap.delete_matching(&1u8, |a, b| a == b), None);
    }

    #[test]
    fn delete_arbitrary() {
        let a = Task::new(10, 1);
        let b = Task::new(1, 2);
        let c = Task::new(5, 3);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();
        heap.insert(&a);
        heap.insert(&b);
        heap.insert(&c);

        let removed = heap.delete(&&c).unwrap();
        assert_eq!(removed.id, 3);
        assert!(!c.pos.in_heap());
        assert_eq!(heap.len(), 2);
        assert!(heap.check_invariants());

        assert_eq!(heap.shift().unwrap().id, 2);
        assert_eq!(heap.shift().unwrap().id, 1);
    }

    #[test]
    fn delete_root() {
        let a = Task::new(10, 1);
        let b = Task::new(1, 2);
        let c = Task::new(5, 3);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();
        heap.insert(&a);
        heap.insert(&b);
        heap.insert(&c);

        assert_eq!(heap.delete(&&b).unwrap().id, 2);
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.min().unwrap().id, 3);
    }

    #[test]
    fn delete_last_slot() {
        let a = Task::new(1, 1);
        let b = Task::new(2, 2);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();
        heap.insert(&a);
        heap.insert(&b);
        assert_eq!(b.pos.get(), Some(1));

        assert_eq!(heap.delete(&&b).unwrap().id, 2);
        assert_eq!(a.pos.get(), Some(0));
        assert!(heap.check_invariants());
    }

    #[test]
    fn delete_twice_is_rejected() {
        let a = Task::new(1, 1);
        let b = Task::new(2, 2);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();
        heap.insert(&a);
        heap.insert(&b);

        assert!(heap.delete(&&a).is_some());
        assert!(heap.delete(&&a).is_none());
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let a = Task::new(1, 1);
        let b = Task::new(2, 2);
        let stranger = Task::new(3, 3);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();
        heap.insert(&a);
        heap.insert(&b);

        // Claims slot 0, which holds `a`.
        stranger.pos.set(0);
        assert!(heap.delete(&&stranger).is_none());
        assert!(heap.reprioritize(&&stranger).is_none());
        assert_eq!(heap.len(), 2);
        assert_eq!(a.pos.get(), Some(0));
    }

    #[test]
    fn delete_without_accessor_is_noop() {
        let a = Task::new(1, 1);
        let mut heap = Heap::new(by_priority);
        heap.insert(&a);

        assert!(heap.delete(&&a).is_none());
        assert!(heap.reprioritize(&&a).is_none());
        assert!(heap.position_of(&&a).is_none());
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn reprioritize_decrease() {
        let a = Task::new(10, 1);
        let b = Task::new(5, 2);
        let c = Task::new(3, 3);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();
        heap.insert(&a);
        heap.insert(&b);
        heap.insert(&c);

        a.priority.set(1);
        assert_eq!(heap.reprioritize(&&a), Some(0));
        assert_eq!(heap.min().unwrap().id, 1);
        assert!(heap.check_invariants());
    }

    #[test]
    fn reprioritize_increase() {
        let a = Task::new(1, 1);
        let b = Task::new(5, 2);
        let c = Task::new(10, 3);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();
        heap.insert(&a);
        heap.insert(&b);
        heap.insert(&c);

        a.priority.set(100);
        let slot = heap.reprioritize(&&a).unwrap();
        assert_ne!(slot, 0);
        assert_eq!(heap.min().unwrap().id, 2);
        assert!(heap.check_invariants());
    }

    #[test]
    fn accessor_backfills_existing_elements() {
        let tasks: Vec<Task> = (0..10).map(|i| Task::new(10 - i, i)).collect();
        let mut heap = Heap::new(by_priority);
        for task in &tasks {
            heap.insert(task);
        }
        assert!(tasks.iter().all(|t| !t.pos.in_heap()));

        heap.track_positions();
        for (slot, task) in heap.iter().enumerate() {
            assert_eq!(task.pos.get(), Some(slot));
        }
        assert!(heap.check_invariants());
    }

    #[test]
    fn sift_down_prefers_left_on_ties() {
        let by_key = |a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0);
        let heap = Heap::build(by_key, vec![(9u8, 'r'), (1u8, 'l'), (1u8, 'x')]);

        assert_eq!(heap.min(), Some(&(1, 'l')));
        assert_eq!(heap.as_slice()[1], (9, 'r'));
        assert_eq!(heap.as_slice()[2], (1, 'x'));
    }

    #[test]
    fn build_heap_returns_swaps() {
        let mut heap = Heap {
            slots: BlockVec::from_vec(4, vec![3, 2, 1], 0),
            cmp: Natural,
            accessor: None,
        };
        assert_eq!(heap.build_heap(), 1);
        assert_eq!(heap.as_slice(), &[1, 2, 3]);
        assert_eq!(heap.build_heap(), 0);
    }

    #[test]
    fn storage_grows_and_shrinks_by_block() {
        let mut heap = Heap::new(Natural);
        for i in 0..129u32 {
            heap.insert(i);
        }
        assert_eq!(heap.capacity(), 256);

        heap.shift();
        // Slack of exactly one block is kept.
        assert_eq!(heap.capacity(), 256);
        heap.shift();
        assert_eq!(heap.capacity(), 128);
    }

    #[test]
    fn clear_resets_positions() {
        let a = Task::new(10, 1);
        let b = Task::new(1, 2);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();
        heap.insert(&a);
        heap.insert(&b);

        heap.clear();
        assert!(heap.is_empty());
        assert!(!a.pos.in_heap());
        assert!(!b.pos.in_heap());
    }

    #[test]
    fn drop_resets_positions() {
        let a = Task::new(10, 1);
        {
            let mut heap = Heap::new(by_priority);
            heap.track_positions();
            heap.insert(&a);
            assert!(a.pos.in_heap());
        }
        assert!(!a.pos.in_heap());
    }

    #[test]
    fn removing_accessor_stops_tracking() {
        let a = Task::new(10, 1);
        let b = Task::new(1, 2);
        let mut heap = Heap::new(by_priority);
        heap.track_positions();
        heap.insert(&a);
        heap.install_position_accessor(None);
        assert!(!heap.tracks_positions());

        heap.insert(&b);
        // `a` moved to slot 1 but its cell was no longer maintained.
        assert_eq!(a.pos.get(), Some(0));
        assert!(b.pos.get().is_none());
    }

    #[test]
    fn stress_insert_shift() {
        let mut heap = Heap::new(Natural);
        for i in 0..1000u32 {
            heap.insert((i * 7 + 13) % 1000);
        }

        let mut last = 0;
        while let Some(priority) = heap.shift() {
            assert!(priority >= last, "heap order violated");
            last = priority;
        }
        assert_eq!(heap.capacity(), DEFAULT_BLOCK_SIZE);
    }

    #[test]
    fn debug_lists_slots() {
        let heap = Heap::build(Natural, vec![2, 1]);
        let mut seen = Vec::new();
        for v in &heap {
            seen.push(*v);
        }
        assert_eq!(seen, vec![1, 2]);

        let out = format!("{heap:?}");
        assert!(out.contains("len: 2"));
        assert!(out.contains("slots: [1, 2]"));
    }
}
