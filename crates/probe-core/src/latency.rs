// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Random pointer-chase latency probe.
//!
//! The region is cut into `nodes` slots of `stride` bytes. A fixed-seed
//! shuffle orders the slots, and each slot's first word stores the word index
//! of the next slot in that order, closing one cycle through every slot.
//! Following the chain is a serial chain of dependent loads whose addresses
//! a stride prefetcher cannot predict, so the average time per step is the
//! load-to-use latency of whatever level the region lives in.
//!
//! The chain stores indices, not addresses: traversal is `idx = words[idx]`.
//!
//! ```text
//! order = [5, 2, 7, 0, ...]
//!
//! slot 5 ──► slot 2 ──► slot 7 ──► slot 0 ──► ... ──► slot 5
//! ```

use crate::ProbeError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::hint::black_box;
use std::time::Instant;

/// Seed for the slot shuffle. Fixed so runs are comparable.
pub const CHASE_SEED: u64 = 1_234_567;

/// Untimed dereferences before the timed traversal.
pub const WARMUP_DEREFS: u64 = 2_000;

/// Lower bound on timed dereferences.
pub const MIN_DEREFS: u64 = 40_000;

/// Upper bound on timed dereferences.
pub const MAX_DEREFS: u64 = 150_000;

/// Timed dereferences per slot before clamping.
const DEREFS_PER_NODE: u64 = 8;

const WORD: usize = std::mem::size_of::<usize>();

/// Number of slots for a region: `max(2, bytes / stride)`.
pub fn node_count(bytes: usize, stride: usize) -> usize {
    (bytes / stride).max(2)
}

/// Timed dereference count: `clamp(nodes * 8, 40000, 150000)`.
pub fn deref_count(nodes: usize) -> u64 {
    (nodes as u64)
        .saturating_mul(DEREFS_PER_NODE)
        .clamp(MIN_DEREFS, MAX_DEREFS)
}

/// A planned chase: slot order plus traversal lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaseChain {
    stride: usize,
    order: Vec<usize>,
    derefs: u64,
}

impl ChaseChain {
    /// Plans a chain over `bytes` with the default seed.
    pub fn plan(bytes: usize, stride: usize) -> Result<Self, ProbeError> {
        Self::with_seed(bytes, stride, CHASE_SEED)
    }

    /// Plans a chain over `bytes` with an explicit seed.
    ///
    /// `stride` must already be rounded to a multiple of the pointer width;
    /// that rounding belongs to configuration, not here.
    pub fn with_seed(bytes: usize, stride: usize, seed: u64) -> Result<Self, ProbeError> {
        if stride == 0 || stride % WORD != 0 {
            return Err(ProbeError::InvalidStride { stride, word: WORD });
        }
        if bytes == 0 {
            return Err(ProbeError::EmptyRegion);
        }

        let nodes = node_count(bytes, stride);
        let mut order: Vec<usize> = (0..nodes).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        Ok(Self {
            stride,
            order,
            derefs: deref_count(nodes),
        })
    }

    /// Number of slots in the cycle.
    pub fn nodes(&self) -> usize {
        self.order.len()
    }

    /// Slot stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Timed dereference count.
    pub fn derefs(&self) -> u64 {
        self.derefs
    }

    /// Slot visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Bytes the chain occupies: `nodes * stride`.
    ///
    /// Exceeds the planned region when it holds fewer than two slots.
    pub fn span_bytes(&self) -> usize {
        self.nodes() * self.stride
    }

    fn slot_word(&self, slot: usize) -> usize {
        slot * (self.stride / WORD)
    }

    /// Writes the cycle into `words` and returns the starting word index.
    pub fn install(&self, words: &mut [usize]) -> Result<usize, ProbeError> {
        let region_bytes = words.len() * WORD;
        if self.span_bytes() > region_bytes {
            return Err(ProbeError::RegionTooSmall {
                span_bytes: self.span_bytes(),
                region_bytes,
            });
        }

        for pair in self.order.windows(2) {
            words[self.slot_word(pair[0])] = self.slot_word(pair[1]);
        }
        let first = self.slot_word(self.order[0]);
        let last = self.slot_word(self.order[self.nodes() - 1]);
        words[last] = first;

        Ok(first)
    }
}

/// Outcome of a latency probe.
#[derive(Debug, Clone, Copy)]
pub struct LatencySample {
    /// Average nanoseconds per dereference.
    pub ns_per_deref: f64,
    /// Timed dereferences performed.
    pub derefs: u64,
    /// Word index the traversal stopped on. Only consumed as a barrier.
    pub end_index: usize,
}

/// Installs `chain` into `words`, warms it up, then times the traversal.
pub fn measure_latency(words: &mut [usize], chain: &ChaseChain) -> Result<LatencySample, ProbeError> {
    let start = chain.install(words)?;
    let words: &[usize] = words;

    let idx = chase(black_box(words), start, WARMUP_DEREFS);

    let derefs = chain.derefs();
    let t0 = Instant::now();
    let end_index = black_box(chase(black_box(words), idx, derefs));
    let elapsed = t0.elapsed();

    let ns_per_deref = elapsed.as_secs_f64() * 1e9 / derefs as f64;
    tracing::debug!(
        nodes = chain.nodes(),
        stride = chain.stride(),
        derefs,
        ns_per_deref,
        "latency probe"
    );

    Ok(LatencySample {
        ns_per_deref,
        derefs,
        end_index,
    })
}

#[inline(never)]
fn chase(words: &[usize], start: usize, steps: u64) -> usize {
    let mut idx = start;
    for _ in 0..steps {
        idx = words[idx];
    }
    idx
}
