// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Raw aligned allocation with RAII release.
//!
//! [`AlignedBuffer`] owns a single region obtained from the global allocator
//! with a caller-chosen alignment (2 MiB by default). The region is released
//! exactly once, in `Drop`, so every exit path (including a failed second
//! allocation) frees it.
//!
//! Memory is requested zeroed. For large regions the allocator usually maps
//! fresh pages lazily, so callers still need [`AlignedBuffer::touch_pages`]
//! before timing anything.

use crate::MemoryError;
use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Default alignment for benchmark buffers: 2 MiB.
pub const ALIGN: usize = 2 * 1024 * 1024;

/// Stride used when committing pages.
pub const PAGE_SIZE: usize = 4096;

/// An owned, aligned, zero-initialised byte region.
pub struct AlignedBuffer {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl AlignedBuffer {
    /// Allocates `size_bytes` aligned to [`ALIGN`].
    pub fn new(size_bytes: usize) -> Result<Self, MemoryError> {
        Self::with_alignment(size_bytes, ALIGN)
    }

    /// Allocates `size_bytes` aligned to `align` (a power of two).
    pub fn with_alignment(size_bytes: usize, align: usize) -> Result<Self, MemoryError> {
        if size_bytes == 0 {
            return Err(MemoryError::ZeroSizedAllocation);
        }

        let layout =
            Layout::from_size_align(size_bytes, align).map_err(|e| MemoryError::InvalidLayout {
                size_bytes,
                align,
                detail: e.to_string(),
            })?;

        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(MemoryError::AllocationFailed {
            requested_bytes: size_bytes,
            align,
        })?;

        tracing::trace!(size_bytes, align, "aligned region allocated");
        Ok(Self { ptr, layout })
    }

    /// Size of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Always `false`: zero-sized buffers are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    /// Alignment the region was allocated with.
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    /// Base address, for alignment checks and diagnostics.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Writes `value` into one byte of every page so the OS commits
    /// physical memory now rather than on first timed access.
    ///
    /// Returns the number of pages touched.
    pub fn touch_pages(&mut self, value: u8) -> usize {
        let base = self.ptr.as_ptr();
        let mut pages = 0;
        for offset in (0..self.len()).step_by(PAGE_SIZE) {
            // SAFETY: offset < len, region is live and uniquely borrowed.
            unsafe { std::ptr::write_volatile(base.add(offset), value) };
            pages += 1;
        }
        pages
    }

    /// The whole region as bytes.
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: region is initialised (zeroed at allocation) and live.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    /// The whole region as mutable bytes.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }

    /// The first `bytes` bytes.
    pub fn prefix(&self, bytes: usize) -> Result<&[u8], MemoryError> {
        self.check_region(bytes)?;
        Ok(&self.as_slice()[..bytes])
    }

    /// The first `bytes` bytes, mutably.
    pub fn prefix_mut(&mut self, bytes: usize) -> Result<&mut [u8], MemoryError> {
        self.check_region(bytes)?;
        Ok(&mut self.as_mut_slice()[..bytes])
    }

    /// Views the first `bytes` bytes as `bytes / 8` doubles.
    pub fn as_f64_slice(&self, bytes: usize) -> Result<&[f64], MemoryError> {
        self.check_region(bytes)?;
        let len = bytes / std::mem::size_of::<f64>();
        // SAFETY: the base is ALIGN-aligned (≥ align_of::<f64>()), the range
        // is in bounds and every bit pattern is a valid f64.
        Ok(unsafe { std::slice::from_raw_parts(self.ptr.as_ptr() as *const f64, len) })
    }

    /// Views the first `bytes` bytes as `bytes / 8` mutable doubles.
    pub fn as_f64_slice_mut(&mut self, bytes: usize) -> Result<&mut [f64], MemoryError> {
        self.check_region(bytes)?;
        let len = bytes / std::mem::size_of::<f64>();
        // SAFETY: see `as_f64_slice`; `&mut self` guarantees exclusivity.
        Ok(unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr() as *mut f64, len) })
    }

    /// Views the first `bytes` bytes as pointer-sized words.
    pub fn as_usize_slice_mut(&mut self, bytes: usize) -> Result<&mut [usize], MemoryError> {
        self.check_region(bytes)?;
        let len = bytes / std::mem::size_of::<usize>();
        // SAFETY: alignment ≥ align_of::<usize>(), in bounds, any bit pattern
        // is a valid usize.
        Ok(unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr() as *mut usize, len) })
    }

    fn check_region(&self, bytes: usize) -> Result<(), MemoryError> {
        if bytes > self.len() {
            return Err(MemoryError::RegionOutOfBounds {
                requested_bytes: bytes,
                capacity_bytes: self.len(),
            });
        }
        debug_assert!(self.alignment() >= std::mem::align_of::<f64>());
        debug_assert!(self.alignment() >= std::mem::align_of::<usize>());
        Ok(())
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with this exact layout and
        // is released only here.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

// The buffer uniquely owns its allocation; moving it between threads is sound.
// It is NOT Sync: shared views are handed out only through `&self`.
unsafe impl Send for AlignedBuffer {}

impl std::fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len())
            .field("align", &self.alignment())
            .finish()
    }
}
