// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tier-by-tier execution of the four probes.
//!
//! A [`BenchRunner`] allocates one [`BufferPair`] sized for the largest tier,
//! commits its pages, then for each tier measures over the buffer prefix of
//! that tier's size:
//!
//! ```text
//! primary[..bytes]   ── read ── write ──┐
//!                                        ├── copy ──► secondary[..bytes]
//! primary[..span]    ── latency chase (span = nodes * stride)
//! ```
//!
//! Buffer contents are never reset between probes or tiers; every probe is
//! indifferent to the values it finds.

use crate::{BenchError, Tier, TierResult, ValidatedConfig};
use memory_manager::{BufferPair, ByteSize};
use probe_core::{copy_bandwidth, measure_latency, read_bandwidth, write_bandwidth, ChaseChain};
use std::time::{Duration, Instant};

/// Owns the buffers for one benchmark run.
#[derive(Debug)]
pub struct BenchRunner {
    config: ValidatedConfig,
    buffers: BufferPair,
}

impl BenchRunner {
    /// Allocates and commits buffers for `config`.
    ///
    /// Fails with [`BenchError::MemoryError`] if the aligned allocation
    /// cannot be satisfied; nothing is measured in that case.
    pub fn new(config: ValidatedConfig) -> Result<Self, BenchError> {
        let capacity = config.required_bytes();
        tracing::info!("allocating 2 x {} buffers", ByteSize::from_bytes(capacity));

        let mut buffers = BufferPair::allocate(capacity)?;
        let pages = buffers.touch();
        tracing::debug!("{pages} pages committed before timing");

        Ok(Self { config, buffers })
    }

    /// Runs every tier in [`crate::TierKind::RUN_ORDER`].
    pub fn run(&mut self) -> Result<RunReport, BenchError> {
        tracing::info!("{}", self.config.summary());
        let start = Instant::now();

        let tiers = *self.config.tiers();
        let mut results = Vec::with_capacity(tiers.len());
        for tier in tiers {
            results.push(self.run_tier(tier)?);
        }

        let report = RunReport {
            results,
            total_duration: start.elapsed(),
        };
        tracing::info!("{}", report.summary());
        Ok(report)
    }

    /// Measures a single tier with this runner's iteration count and stride.
    pub fn run_tier(&mut self, tier: Tier) -> Result<TierResult, BenchError> {
        run_tier(
            &mut self.buffers,
            tier,
            self.config.iters(),
            self.config.stride(),
        )
    }
}

/// Measures one tier against the prefix of `buffers` matching its capacity.
///
/// The caller guarantees `buffers` was sized for this tier (see
/// [`ValidatedConfig::required_bytes`]); an undersized pair surfaces as a
/// `RegionOutOfBounds` memory error.
pub fn run_tier(
    buffers: &mut BufferPair,
    tier: Tier,
    iters: u32,
    stride: usize,
) -> Result<TierResult, BenchError> {
    let _span = tracing::info_span!("tier", tier = %tier.kind, size = %tier.capacity).entered();
    let bytes = tier.capacity.as_bytes();
    let probe_err = |source| BenchError::ProbeError {
        tier: tier.kind.to_string(),
        source,
    };

    let read = read_bandwidth(buffers.primary().as_f64_slice(bytes)?, iters).map_err(probe_err)?;
    std::hint::black_box(read.checksum);

    let write =
        write_bandwidth(buffers.primary_mut().as_f64_slice_mut(bytes)?, iters).map_err(probe_err)?;

    let (primary, secondary) = buffers.split_mut();
    let copy = copy_bandwidth(secondary.prefix_mut(bytes)?, primary.prefix(bytes)?, iters)
        .map_err(probe_err)?;

    let chain = ChaseChain::plan(bytes, stride).map_err(probe_err)?;
    tracing::debug!(
        nodes = chain.nodes(),
        derefs = chain.derefs(),
        span = chain.span_bytes(),
        "chase chain planned"
    );
    let words = buffers.primary_mut().as_usize_slice_mut(chain.span_bytes())?;
    let latency = measure_latency(words, &chain).map_err(probe_err)?;

    tracing::info!(
        read_mbps = read.bandwidth.mb_per_sec(),
        write_mbps = write.mb_per_sec(),
        copy_mbps = copy.mb_per_sec(),
        latency_ns = latency.ns_per_deref,
        "tier measured"
    );

    Ok(TierResult {
        tier,
        read: read.bandwidth,
        write,
        copy,
        latency_ns: latency.ns_per_deref,
    })
}

/// All tier results of a run, in run order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub results: Vec<TierResult>,
    /// Wall-clock time for all tiers (excluding allocation).
    pub total_duration: Duration,
}

impl RunReport {
    /// Returns a human-readable summary suitable for logs.
    pub fn summary(&self) -> String {
        let fastest = self
            .results
            .iter()
            .max_by(|a, b| a.read.bytes_per_sec().total_cmp(&b.read.bytes_per_sec()));
        let slowest_latency = self
            .results
            .iter()
            .max_by(|a, b| a.latency_ns.total_cmp(&b.latency_ns));

        let mut out = format!(
            "Run: {} tiers in {:.2}s",
            self.results.len(),
            self.total_duration.as_secs_f64()
        );
        if let Some(r) = fastest {
            out.push_str(&format!(
                ", fastest read {} ({:.2} GB/s)",
                r.kind(),
                r.read.gb_per_sec()
            ));
        }
        if let Some(r) = slowest_latency {
            out.push_str(&format!(
                ", highest latency {} ({:.2} ns)",
                r.kind(),
                r.latency_ns
            ));
        }
        out
    }
}
