// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tier-runner
//!
//! Drives the probes across the four capacity tiers and formats the results.
//!
//! The runner takes:
//! - A [`ValidatedConfig`] (iterations, stride, tier sizes).
//! - A [`memory_manager::BufferPair`] it allocates itself, sized for the
//!   largest tier.
//!
//! And produces a [`RunReport`]: one [`TierResult`] per tier, in the fixed
//! order Memory, L1, L2, L3.
//!
//! # Pipeline
//! ```text
//! BenchConfig ──validate()──► ValidatedConfig ──BenchRunner::new()──► BenchRunner
//!                                                                        │ run()
//!                                                                        ▼
//!                                                     RunReport ──report::render()──► text
//! ```
//!
//! # Example
//! ```
//! use tier_runner::{report, BenchConfig, BenchRunner};
//!
//! let config = BenchConfig {
//!     iters: 1,
//!     l1_kb: 4,
//!     l2_kb: 8,
//!     l3_kb: 16,
//!     mem_kb: 32,
//!     ..Default::default()
//! };
//! let mut runner = BenchRunner::new(config.validate()?)?;
//! let run = runner.run()?;
//! assert_eq!(report::render(&run).lines().count(), 5);
//! # Ok::<(), tier_runner::BenchError>(())
//! ```

mod config;
mod error;
pub mod report;
mod runner;
mod tier;

pub use config::{round_stride, BenchConfig, ValidatedConfig, QUICK_ITERS, QUICK_MEM_KB};
pub use error::BenchError;
pub use runner::{run_tier, BenchRunner, RunReport};
pub use tier::{Tier, TierKind, TierResult};
