// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The primary/secondary buffer pair a benchmark run owns.
//!
//! Both halves are the same size: the requested capacity plus one
//! [`ALIGN`] unit of slack. The primary is read and written directly; the
//! secondary is the destination of copy probes.

use crate::{AlignedBuffer, ByteSize, MemoryError, ALIGN};

/// Two equally sized aligned regions, allocated and released together.
///
/// # Example
/// ```
/// use memory_manager::BufferPair;
///
/// let mut pair = BufferPair::allocate(64 * 1024).unwrap();
/// let pages = pair.touch();
/// assert!(pages > 0);
///
/// let (primary, secondary) = pair.split_mut();
/// secondary.as_mut_slice()[..16].copy_from_slice(&primary.as_slice()[..16]);
/// ```
#[derive(Debug)]
pub struct BufferPair {
    primary: AlignedBuffer,
    secondary: AlignedBuffer,
}

impl BufferPair {
    /// Allocates both buffers with room for `capacity_bytes` plus slack.
    ///
    /// If the second allocation fails, the first is released before the
    /// error is returned.
    pub fn allocate(capacity_bytes: usize) -> Result<Self, MemoryError> {
        if capacity_bytes == 0 {
            return Err(MemoryError::ZeroSizedAllocation);
        }
        let total = capacity_bytes.checked_add(ALIGN).ok_or_else(|| {
            MemoryError::InvalidSize(format!("{capacity_bytes} bytes plus alignment slack overflows"))
        })?;

        let primary = AlignedBuffer::new(total)?;
        let secondary = AlignedBuffer::new(total)?;

        tracing::debug!(
            "allocated buffer pair: 2 x {} ({} usable)",
            ByteSize::from_bytes(total),
            ByteSize::from_bytes(capacity_bytes),
        );

        Ok(Self { primary, secondary })
    }

    /// Commits every page of both buffers. Returns total pages touched.
    pub fn touch(&mut self) -> usize {
        let pages = self.primary.touch_pages(1) + self.secondary.touch_pages(2);
        tracing::debug!(pages, "buffer pages committed");
        pages
    }

    /// Size of each buffer in bytes (including slack).
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    /// Always `false` for a successfully allocated pair.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// The primary buffer.
    pub fn primary(&self) -> &AlignedBuffer {
        &self.primary
    }

    /// The primary buffer, mutably.
    pub fn primary_mut(&mut self) -> &mut AlignedBuffer {
        &mut self.primary
    }

    /// The secondary buffer.
    pub fn secondary(&self) -> &AlignedBuffer {
        &self.secondary
    }

    /// Both buffers at once: `(primary, secondary)`.
    pub fn split_mut(&mut self) -> (&mut AlignedBuffer, &mut AlignedBuffer) {
        (&mut self.primary, &mut self.secondary)
    }
}
