//! Position cells for O(1) lookup of an element's heap slot.
//!
//! An element that wants to be deleted or re-prioritized in O(log n) embeds a
//! [`Position`] and exposes it through [`Positioned`] (or through a plain
//! [`PositionAccessor`] function). The heap writes the element's current slot
//! into the cell every time it moves the element, so the caller never has to
//! search for it.
//!
//! The cell belongs to the element, not the heap. Only the heap writes it.

use core::cell::Cell;
use core::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Maps an element handle to its position cell.
///
/// Must return the same cell for the same element on every call.
pub type PositionAccessor<T> = fn(&T) -> &Position;

/// Sentinel stored while the element is not in a heap.
const NONE: usize = usize::MAX;

/// An element's current slot in a heap.
///
/// Starts out (and returns to, on removal) the "not in heap" state.
///
/// # Example
///
/// ```
/// use nexus_heap::Position;
///
/// let pos = Position::new();
/// assert!(!pos.in_heap());
/// assert_eq!(pos.get(), None);
/// ```
pub struct Position {
    slot: Cell<usize>,
}

impl Position {
    /// Creates a cell in the "not in heap" state.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slot: Cell::new(NONE),
        }
    }

    /// Returns the slot last recorded by the heap, or `None` if the element
    /// is not in a heap.
    #[inline]
    pub fn get(&self) -> Option<usize> {
        let slot = self.slot.get();
        if slot == NONE { None } else { Some(slot) }
    }

    /// Returns `true` if the element is currently in a heap.
    #[inline]
    pub fn in_heap(&self) -> bool {
        self.slot.get() != NONE
    }

    #[inline]
    pub(crate) fn set(&self, slot: usize) {
        debug_assert_ne!(slot, NONE);
        self.slot.set(slot);
    }

    #[inline]
    pub(crate) fn clear(&self) {
        self.slot.set(NONE);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(slot) => f.debug_tuple("Position").field(&slot).finish(),
            None => f.write_str("Position(None)"),
        }
    }
}

/// Types that carry a [`Position`].
///
/// Implement this on the element type; the heap picks it up through
/// [`Heap::track_positions`](crate::Heap::track_positions). The impl is
/// forwarded through references and smart pointers, so a heap of `&Task`,
/// `Box<Task>`, or `Rc<Task>` tracks the same cell as `Task` itself.
///
/// # Example
///
/// ```
/// use nexus_heap::{Heap, Position, Positioned};
/// use std::cell::Cell;
///
/// struct Timer {
///     deadline: Cell<u64>,
///     pos: Position,
/// }
///
/// impl Positioned for Timer {
///     fn position(&self) -> &Position {
///         &self.pos
///     }
/// }
///
/// let a = Timer { deadline: Cell::new(30), pos: Position::new() };
/// let b = Timer { deadline: Cell::new(10), pos: Position::new() };
///
/// let mut heap = Heap::new(|x: &&Timer, y: &&Timer| x.deadline.get().cmp(&y.deadline.get()));
/// heap.track_positions();
/// heap.insert(&a);
/// heap.insert(&b);
///
/// assert_eq!(b.pos.get(), Some(0));
///
/// // Reschedule `a` ahead of `b`.
/// a.deadline.set(5);
/// heap.reprioritize(&&a);
/// assert_eq!(a.pos.get(), Some(0));
/// ```
pub trait Positioned {
    /// Returns this element's position cell.
    fn position(&self) -> &Position;
}

impl Positioned for Position {
    #[inline]
    fn position(&self) -> &Position {
        self
    }
}

macro_rules! forward_positioned {
    ($($ptr:ty),*) => {
        $(
            impl<P: Positioned + ?Sized> Positioned for $ptr {
                #[inline]
                fn position(&self) -> &Position {
                    (**self).position()
                }
            }
        )*
    };
}

forward_positioned!(&P, &mut P, Box<P>, Rc<P>, Arc<P>);
