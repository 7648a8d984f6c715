//! obstack - an object stack memory arena
//!
//! A fixed-capacity, contiguous region from which typed objects are
//! allocated by pointer bumping and released in (approximately) reverse
//! order. Every allocation carries a small header recording its destructor
//! and a link to the previous chunk, so the arena supports out-of-order
//! release with lazy memory reclamation and bulk teardown that runs each
//! live destructor exactly once.
//!
//! Built for workloads where many short-lived objects of varying type share
//! a single logical lifetime: parsers, compilers, request processors. It is
//! not a general-purpose allocator replacement.
//!
//! # Examples
//!
//! ```
//! use obstack::Obstack;
//!
//! let mut arena = Obstack::new(64 * 1024);
//!
//! let n = arena.alloc(7u64).expect("capacity");
//! let text = arena.alloc(String::from("scratch")).expect("capacity");
//!
//! unsafe {
//!     assert_eq!(*n.as_ptr(), 7);
//!     assert_eq!(&*text.as_ptr(), "scratch");
//!
//!     // Out of order: the integer is destructed now, its bytes reclaim
//!     // once the string above it is released too.
//!     arena.dealloc(n.as_ptr());
//!     assert!(arena.size() > 0);
//!     arena.dealloc(text.as_ptr());
//! }
//! assert_eq!(arena.size(), 0);
//! ```

pub mod arena;
pub mod logging;

// Re-export the public surface
pub use arena::{
    max_overhead, HeapRegion, MaxAlign, NullRegion, Obstack, ObstackStats, RegionProvider,
    MAX_ALIGN,
};

// Re-export logging for convenience
pub use logging::{init as init_logging, log_allocation, log_deallocation, log_reclamation};
