//! Logging utilities for the arena
//!
//! Lightweight structured logging for allocation, release and reclamation
//! events. Uses `tracing` so hot-path events cost nothing when the filter
//! level excludes them.

// Re-export tracing macros for use throughout the crate
pub use tracing::{debug, error, info, trace, warn, Level};

/// Initialize logging with sensible defaults.
///
/// Honors `RUST_LOG` when set. Debug builds otherwise default to DEBUG for
/// this crate; release builds default to INFO. Safe to call more than once.
pub fn init() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            EnvFilter::new("obstack=debug")
        }
        #[cfg(not(debug_assertions))]
        {
            EnvFilter::new("obstack=info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}

/// Log an allocation event
#[inline]
pub fn log_allocation(size: usize, ptr: *const u8) {
    trace!(
        target: "arena",
        size,
        ptr = ?ptr,
        "allocated chunk"
    );
}

/// Log a release event
#[inline]
pub fn log_deallocation(ptr: *const u8) {
    trace!(
        target: "arena",
        ptr = ?ptr,
        "destructed chunk"
    );
}

/// Log a tombstone-run sweep
#[inline]
pub fn log_reclamation(bytes: usize, chunks: usize) {
    trace!(
        target: "arena",
        bytes,
        chunks,
        "reclaimed tombstone run"
    );
}
