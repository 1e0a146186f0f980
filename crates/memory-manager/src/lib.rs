// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # memory-manager
//!
//! Aligned, page-committed buffers for memory-subsystem benchmarks.
//!
//! # Key Components
//!
//! - [`AlignedBuffer`]: one region from the global allocator, aligned to
//!   2 MiB and released in `Drop`.
//! - [`BufferPair`]: the primary/secondary regions a run owns, sized for the
//!   largest tier plus one alignment unit of slack.
//! - [`ByteSize`]: byte counts with human-readable parsing (`"64"`, `"4K"`,
//!   `"2M"`) and display.
//!
//! # Ownership Model
//!
//! ```text
//! BufferPair::allocate(capacity)
//!       │
//!       ▼
//!   primary: AlignedBuffer ─┐
//!   secondary: AlignedBuffer┘ ── touch() commits every page
//!       │
//!       │  drop()
//!       ▼
//!   dealloc(ptr, layout), once per buffer
//! ```
//!
//! Typed views (`as_f64_slice`, `as_usize_slice_mut`) borrow the buffer, so
//! the borrow checker keeps probes from outliving the allocation.
//!
//! # Example
//! ```
//! use memory_manager::{BufferPair, ByteSize};
//!
//! let capacity = ByteSize::from_kb(32).unwrap();
//! let mut pair = BufferPair::allocate(capacity.as_bytes()).unwrap();
//! pair.touch();
//!
//! let doubles = pair.primary_mut().as_f64_slice_mut(capacity.as_bytes()).unwrap();
//! assert_eq!(doubles.len(), 32 * 1024 / 8);
//! ```

mod aligned;
mod error;
mod pair;
mod size;

pub use aligned::{AlignedBuffer, ALIGN, PAGE_SIZE};
pub use error::MemoryError;
pub use pair::BufferPair;
pub use size::ByteSize;
