//! Binary min-heap with block-granular storage and in-element position
//! tracking.
//!
//! The heap orders caller-supplied handles with a [`Compare`] and keeps the
//! smallest at the root. It never clones or owns the elements behind the
//! handles; it only moves handles between slots.
//!
//! # Design
//!
//! ```text
//! Heap<T, C>
//!   slots     - BlockVec<T>, capacity in whole blocks of B (default 128)
//!   cmp       - C: Compare<T>, total order
//!   accessor  - Option<fn(&T) -> &Position>, O(1) slot lookup
//! ```
//!
//! Two features go beyond a textbook heap:
//!
//! - **Linear-time construction**: [`Heap::build`] adopts an existing `Vec`
//!   and heapifies it bottom-up in O(n).
//! - **Positional delete and re-prioritize**: elements embed a [`Position`]
//!   cell. With an accessor installed the heap rewrites the cell on every
//!   move, so [`Heap::delete`] and [`Heap::reprioritize`] find the element
//!   in O(1) and repair order in O(log n).
//!
//! # Quick Start
//!
//! ```
//! use nexus_heap::{Heap, Natural};
//!
//! let mut heap = Heap::new(Natural);
//! heap.insert(7);
//! heap.insert(1);
//! heap.insert(3);
//!
//! assert_eq!(heap.min(), Some(&1));
//! assert_eq!(heap.shift(), Some(1));
//! assert_eq!(heap.len(), 2);
//! ```
//!
//! # Position Tracking
//!
//! ```
//! use nexus_heap::{Heap, Position, Positioned};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! struct Timer {
//!     deadline: Cell<u64>,
//!     pos: Position,
//! }
//!
//! impl Positioned for Timer {
//!     fn position(&self) -> &Position {
//!         &self.pos
//!     }
//! }
//!
//! let timer = Rc::new(Timer { deadline: Cell::new(100), pos: Position::new() });
//!
//! let mut heap = Heap::new(|a: &Rc<Timer>, b: &Rc<Timer>| {
//!     a.deadline.get().cmp(&b.deadline.get())
//! });
//! heap.track_positions();
//! heap.insert(Rc::clone(&timer));
//!
//! assert_eq!(timer.pos.get(), Some(0));
//!
//! // Cancel through our own handle; the heap hands back its copy.
//! let removed = heap.delete(&timer).unwrap();
//! assert!(Rc::ptr_eq(&removed, &timer));
//! assert!(!timer.pos.in_heap());
//! ```
//!
//! # Resize Policy
//!
//! | Event | Condition | New capacity |
//! |-------|-----------|--------------|
//! | grow | `len + 1 > capacity` | next multiple of B above `len` |
//! | shrink | `capacity - len > B` after a removal | next multiple of B above `len` |
//!
//! Use [`HeapBuilder`] to pick B or pre-size the heap.
//!
//! # Threading
//!
//! Single-threaded. [`Position`] is a `Cell`, so tracked elements are not
//! `Sync`; share a heap across threads behind one lock.

#![warn(missing_docs)]

mod block;
pub mod builder;
pub mod compare;
pub mod error;
pub mod heap;
pub mod position;
mod verify;

pub use builder::{DEFAULT_BLOCK_SIZE, HeapBuilder};
pub use compare::{Compare, Natural};
pub use error::{AllocError, HeapError, Violation};
pub use heap::{DrainWhile, Heap};
pub use position::{Position, PositionAccessor, Positioned};
