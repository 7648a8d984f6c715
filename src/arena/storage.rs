//! Backing storage - region acquisition and ownership
//!
//! The arena core never talks to the allocator directly; it goes through a
//! `RegionProvider` that deals in whole `MaxAlign` units. `HeapRegion` is the
//! default provider; `NullRegion` backs placed-mode arenas that adopt an
//! externally supplied buffer.

use core::mem::size_of;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc, Layout};

use crate::logging::{debug, trace, warn};

use super::alignment::{MaxAlign, MAX_ALIGN};

/// Source of raw max-aligned memory, measured in `MaxAlign` units.
pub trait RegionProvider {
    /// Acquire `units` contiguous max-aligned units, or `None` on failure.
    fn acquire(&mut self, units: usize) -> Option<NonNull<MaxAlign>>;

    /// Return a region previously handed out by `acquire`.
    ///
    /// # Safety
    ///
    /// `region` and `units` must match a prior successful `acquire` on this
    /// provider, and the region must not be used afterwards.
    unsafe fn release(&mut self, region: NonNull<MaxAlign>, units: usize);
}

/// Default provider backed by the global heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapRegion;

impl HeapRegion {
    #[inline]
    fn layout(units: usize) -> Layout {
        // units is bounded by a successful acquire; size cannot overflow.
        unsafe { Layout::from_size_align_unchecked(units * size_of::<MaxAlign>(), MAX_ALIGN) }
    }
}

impl RegionProvider for HeapRegion {
    fn acquire(&mut self, units: usize) -> Option<NonNull<MaxAlign>> {
        if units == 0 {
            return None;
        }
        let layout = Layout::array::<MaxAlign>(units).ok()?;
        trace!(units, bytes = layout.size(), "requesting backing region");

        let raw = unsafe { alloc(layout) };
        if raw.is_null() {
            warn!(bytes = layout.size(), "backing region acquisition failed");
            return None;
        }

        debug!(address = ?raw, bytes = layout.size(), "backing region acquired");
        NonNull::new(raw.cast())
    }

    unsafe fn release(&mut self, region: NonNull<MaxAlign>, units: usize) {
        trace!(address = ?region.as_ptr(), units, "releasing backing region");
        dealloc(region.as_ptr().cast(), Self::layout(units));
    }
}

/// Provider that never yields memory; placed-mode arenas use it so the
/// release call on teardown is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRegion;

impl RegionProvider for NullRegion {
    fn acquire(&mut self, _units: usize) -> Option<NonNull<MaxAlign>> {
        None
    }

    unsafe fn release(&mut self, _region: NonNull<MaxAlign>, _units: usize) {}
}

/// Owns the byte region an arena allocates from and returns it to the
/// provider on drop, regardless of which construction mode produced it.
pub(crate) struct Storage<P: RegionProvider> {
    provider: P,
    region: NonNull<MaxAlign>,
    units: usize,
}

impl<P: RegionProvider> Storage<P> {
    /// Allocated mode: round the byte capacity up to whole units and acquire
    /// them from the provider.
    pub fn acquire(capacity_bytes: usize, mut provider: P) -> Self {
        let unit = size_of::<MaxAlign>();
        let units = capacity_bytes / unit + usize::from(capacity_bytes % unit != 0);

        let region = provider
            .acquire(units)
            .expect("backing region provider returned no memory");
        debug_assert_eq!(
            region.as_ptr() as usize % MAX_ALIGN,
            0,
            "provider returned a misaligned region"
        );

        Storage { provider, region, units }
    }

    /// Placed mode: adopt an externally supplied buffer. The buffer is not
    /// owned by this holder, but `release` is still invoked on drop.
    ///
    /// # Safety
    ///
    /// `buffer` must point to at least `bytes` bytes of writable memory that
    /// outlives the storage and is not used by anything else meanwhile.
    pub unsafe fn adopt(buffer: NonNull<MaxAlign>, bytes: usize, provider: P) -> Self {
        assert!(
            bytes >= size_of::<MaxAlign>(),
            "supplied buffer is smaller than one max-aligned unit"
        );
        assert_eq!(
            buffer.as_ptr() as usize % MAX_ALIGN,
            0,
            "supplied buffer is not max-aligned"
        );

        Storage {
            provider,
            region: buffer,
            units: bytes / size_of::<MaxAlign>(),
        }
    }

    #[inline]
    pub fn begin(&self) -> *mut u8 {
        self.region.as_ptr().cast()
    }

    #[inline]
    pub fn end(&self) -> *mut u8 {
        self.begin().wrapping_add(self.capacity_bytes())
    }

    #[inline]
    pub fn capacity_bytes(&self) -> usize {
        self.units * size_of::<MaxAlign>()
    }
}

impl<P: RegionProvider> Drop for Storage<P> {
    fn drop(&mut self) {
        unsafe { self.provider.release(self.region, self.units) };
    }
}
