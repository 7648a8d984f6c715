//! Chunk metadata - layout primitives for the arena
//!
//! Every allocation is prefixed by a `ChunkHeader` padded out to `MAX_ALIGN`,
//! so the payload that follows always starts on a max-aligned boundary. The
//! header records the previous chunk, the XOR-masked destructor and an
//! integrity checksum.

use core::mem::size_of;
use core::ptr;

use once_cell::sync::Lazy;

use super::alignment::{align_up, MAX_ALIGN};
use super::cookie;

/// Type-erased destructor signature stored (masked) in each header.
pub(crate) type DtorFn = unsafe fn(*mut u8);

/// Per-chunk metadata, written immediately before each payload.
#[repr(C)]
pub(crate) struct ChunkHeader {
    /// Previous chunk header, or null for the bottom of the stack.
    pub prev: *mut ChunkHeader,
    /// XOR-masked destructor pointer, or a masked sentinel.
    pub dtor_xor: usize,
    /// `prev ^ dtor_xor ^ checksum_cookie`, validated on release.
    pub checksum: usize,
}

/// Header footprint including padding to the next max-aligned boundary.
pub(crate) const HEADER_SIZE: usize = align_up(size_of::<ChunkHeader>(), MAX_ALIGN);

impl ChunkHeader {
    #[inline]
    pub fn checksum_ok(&self) -> bool {
        cookie::checksum_ok(self.prev as usize, self.dtor_xor, self.checksum)
    }
}

/// Header address for a payload pointer (header sits `HEADER_SIZE` before it).
#[inline(always)]
pub(crate) fn header_of(payload: *mut u8) -> *mut ChunkHeader {
    payload.wrapping_sub(HEADER_SIZE).cast()
}

/// Payload address for a header pointer.
#[inline(always)]
pub(crate) fn payload_of(header: *mut ChunkHeader) -> *mut u8 {
    header.cast::<u8>().wrapping_add(HEADER_SIZE)
}

/// Monomorphic bridge from a raw payload address to `T`'s destructor.
unsafe fn drop_thunk<T>(payload: *mut u8) {
    ptr::drop_in_place(payload.cast::<T>());
}

// Sentinels are addresses of distinct statics rather than no-op functions:
// identical-code-folding may merge two empty functions into a single address,
// which would make the free marker and the trivial-array marker
// indistinguishable. The initializers differ so the statics cannot merge.
static FREE_MARKER: u8 = 0x5f;
static TRIVIAL_ARRAY_MARKER: u8 = 0xa7;

static FREE_MARKER_MASKED: Lazy<usize> =
    Lazy::new(|| cookie::mask(&FREE_MARKER as *const u8 as usize));
static TRIVIAL_ARRAY_MASKED: Lazy<usize> =
    Lazy::new(|| cookie::mask(&TRIVIAL_ARRAY_MARKER as *const u8 as usize));

/// Masked form of the tombstone marker; comparisons are masked-to-masked.
#[inline(always)]
pub(crate) fn free_marker_masked() -> usize {
    *FREE_MARKER_MASKED
}

/// Masked form of the trivially-destructible-array marker.
#[inline(always)]
pub(crate) fn trivial_array_masked() -> usize {
    *TRIVIAL_ARRAY_MASKED
}

/// Masked destructor thunk for `T`, ready to store in a header.
#[inline]
pub(crate) fn masked_thunk<T>() -> usize {
    cookie::mask(drop_thunk::<T> as DtorFn as usize)
}

/// Unmask a stored destructor, filtering out both sentinels.
///
/// Returns `None` for tombstoned chunks and trivial arrays; those never have
/// a destructor invoked.
#[inline]
pub(crate) fn live_thunk(masked: usize) -> Option<DtorFn> {
    if masked == free_marker_masked() || masked == trivial_array_masked() {
        return None;
    }
    // A value that is neither sentinel was stored by `masked_thunk` and
    // unmasks back to the thunk's address.
    let raw = cookie::unmask(masked);
    Some(unsafe { core::mem::transmute::<usize, DtorFn>(raw) })
}
