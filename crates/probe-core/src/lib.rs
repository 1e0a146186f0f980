// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # probe-core
//!
//! Single-threaded memory measurement kernels.
//!
//! - [`read_bandwidth`], [`write_bandwidth`], [`copy_bandwidth`]: sequential
//!   sweeps over a region, reported as [`Bandwidth`].
//! - [`ChaseChain`] and [`measure_latency`]: a fixed-seed random cycle
//!   through `stride`-spaced slots, reported as nanoseconds per dereference.
//!
//! Probes borrow plain slices. Where those slices live (and whether they are
//! resident in the intended cache level) is the caller's business.
//!
//! # Example
//! ```
//! use probe_core::{read_bandwidth, ChaseChain, measure_latency};
//!
//! let data = vec![0.0f64; 4096];
//! let read = read_bandwidth(&data, 2).unwrap();
//! assert!(read.bandwidth.bytes_per_sec() > 0.0);
//!
//! let chain = ChaseChain::plan(32 * 1024, 64).unwrap();
//! let mut words = vec![0usize; 32 * 1024 / std::mem::size_of::<usize>()];
//! let sample = measure_latency(&mut words, &chain).unwrap();
//! assert_eq!(sample.derefs, chain.derefs());
//! ```

pub mod bandwidth;
mod error;
pub mod latency;

pub use bandwidth::{copy_bandwidth, read_bandwidth, write_bandwidth, Bandwidth, ReadOutcome};
pub use error::ProbeError;
pub use latency::{measure_latency, ChaseChain, LatencySample};
