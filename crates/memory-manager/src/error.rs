// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for buffer allocation and access.

/// Errors that can occur while allocating or viewing benchmark buffers.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The system could not satisfy an aligned allocation request.
    #[error("allocation failed: could not reserve {requested_bytes} bytes aligned to {align} bytes")]
    AllocationFailed { requested_bytes: usize, align: usize },

    /// Attempted to allocate a zero-sized buffer.
    #[error("cannot allocate zero-sized buffer")]
    ZeroSizedAllocation,

    /// The size/alignment pair does not form a valid layout.
    #[error("invalid layout for {size_bytes} bytes aligned to {align}: {detail}")]
    InvalidLayout {
        size_bytes: usize,
        align: usize,
        detail: String,
    },

    /// A view was requested past the end of the allocation.
    #[error("region of {requested_bytes} bytes exceeds buffer of {capacity_bytes} bytes")]
    RegionOutOfBounds {
        requested_bytes: usize,
        capacity_bytes: usize,
    },

    /// A size string could not be parsed, or overflowed.
    #[error("invalid size: {0}")]
    InvalidSize(String),
}
