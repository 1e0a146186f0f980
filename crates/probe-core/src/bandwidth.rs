// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sequential read, write and copy bandwidth probes.
//!
//! Every probe follows the same shape:
//!
//! 1. One untimed warm-up pass, so the timed passes do not pay first-touch
//!    or cold-cache cost.
//! 2. `iters` timed passes, accumulated with the monotonic clock.
//! 3. Throughput = `bytes / (total / iters)`.
//!
//! The kernels are passed through [`black_box`] on entry and exit of every
//! pass. Without that the optimiser may hoist an unchanged reduction out of
//! the repeat loop, or drop a pass whose writes are never read.

use crate::ProbeError;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Cache-line size assumed by the warm-up passes.
pub const CACHE_LINE: usize = 64;

/// Doubles per cache line, the warm-up step for read and write probes.
const WARMUP_STEP: usize = CACHE_LINE / std::mem::size_of::<f64>();

/// Lower bound on per-pass time; keeps results finite on coarse clocks.
const MIN_PASS_SECS: f64 = 1e-9;

/// A throughput measurement in bytes per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Bandwidth {
    bytes_per_sec: f64,
}

impl Bandwidth {
    /// Wraps a raw bytes-per-second value.
    pub fn from_bytes_per_sec(bytes_per_sec: f64) -> Self {
        Self { bytes_per_sec }
    }

    /// Wraps a megabytes-per-second value (decimal MB).
    pub fn from_mb_per_sec(mb_per_sec: f64) -> Self {
        Self::from_bytes_per_sec(mb_per_sec * 1e6)
    }

    /// Computes throughput for `bytes` moved per pass over `iters` passes
    /// taking `total` in aggregate.
    pub fn measured(bytes: usize, total: Duration, iters: u32) -> Self {
        let per_pass = (total.as_secs_f64() / f64::from(iters.max(1))).max(MIN_PASS_SECS);
        Self::from_bytes_per_sec(bytes as f64 / per_pass)
    }

    /// Bytes per second.
    pub fn bytes_per_sec(&self) -> f64 {
        self.bytes_per_sec
    }

    /// Decimal megabytes per second.
    pub fn mb_per_sec(&self) -> f64 {
        self.bytes_per_sec / 1e6
    }

    /// Decimal gigabytes per second.
    pub fn gb_per_sec(&self) -> f64 {
        self.bytes_per_sec / 1e9
    }
}

/// Outcome of a read probe.
///
/// `checksum` is the last pass's sum. It exists only so the reduction has a
/// consumer; it carries no meaning and is never reported.
#[derive(Debug, Clone, Copy)]
pub struct ReadOutcome {
    pub bandwidth: Bandwidth,
    pub checksum: f64,
}

/// Sums every element sequentially, `iters` times.
pub fn read_bandwidth(data: &[f64], iters: u32) -> Result<ReadOutcome, ProbeError> {
    check_args(data.len(), iters)?;

    let mut warm = 0.0;
    for i in (0..data.len()).step_by(WARMUP_STEP) {
        warm += data[i];
    }
    black_box(warm);

    let mut checksum = 0.0;
    let total = time_passes(iters, || {
        checksum = black_box(sum_pass(black_box(data)));
    });

    let bytes = std::mem::size_of_val(data);
    let bandwidth = Bandwidth::measured(bytes, total, iters);
    tracing::debug!(bytes, iters, mb_per_sec = bandwidth.mb_per_sec(), "read probe");
    Ok(ReadOutcome {
        bandwidth,
        checksum,
    })
}

/// Overwrites every element with its index, `iters` times.
pub fn write_bandwidth(data: &mut [f64], iters: u32) -> Result<Bandwidth, ProbeError> {
    check_args(data.len(), iters)?;

    for i in (0..data.len()).step_by(WARMUP_STEP) {
        data[i] = i as f64;
    }

    let total = time_passes(iters, || {
        write_pass(black_box(&mut *data));
    });
    black_box(&*data);

    let bytes = std::mem::size_of_val(data);
    let bandwidth = Bandwidth::measured(bytes, total, iters);
    tracing::debug!(bytes, iters, mb_per_sec = bandwidth.mb_per_sec(), "write probe");
    Ok(bandwidth)
}

/// Copies `src` into `dst` with the platform bulk copy, `iters` times.
///
/// The warm-up is itself a full copy.
pub fn copy_bandwidth(dst: &mut [u8], src: &[u8], iters: u32) -> Result<Bandwidth, ProbeError> {
    if src.len() != dst.len() {
        return Err(ProbeError::LengthMismatch {
            src_bytes: src.len(),
            dst_bytes: dst.len(),
        });
    }
    check_args(src.len(), iters)?;

    dst.copy_from_slice(src);

    let total = time_passes(iters, || {
        black_box(&mut *dst).copy_from_slice(black_box(src));
    });
    black_box(&*dst);

    let bandwidth = Bandwidth::measured(src.len(), total, iters);
    tracing::debug!(
        bytes = src.len(),
        iters,
        mb_per_sec = bandwidth.mb_per_sec(),
        "copy probe"
    );
    Ok(bandwidth)
}

fn check_args(len: usize, iters: u32) -> Result<(), ProbeError> {
    if len == 0 {
        return Err(ProbeError::EmptyRegion);
    }
    if iters == 0 {
        return Err(ProbeError::ZeroIterations);
    }
    Ok(())
}

/// Runs `pass` `iters` times, timing each call and summing the durations.
fn time_passes(iters: u32, mut pass: impl FnMut()) -> Duration {
    let mut total = Duration::ZERO;
    for _ in 0..iters {
        let start = Instant::now();
        pass();
        total += start.elapsed();
    }
    total
}

#[inline(never)]
fn sum_pass(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    for &x in data {
        sum += x;
    }
    sum
}

#[inline(never)]
fn write_pass(data: &mut [f64]) {
    for (i, x) in data.iter_mut().enumerate() {
        *x = i as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive_finite(b: Bandwidth) -> bool {
        b.bytes_per_sec().is_finite() && b.bytes_per_sec() > 0.0
    }

    #[test]
    fn test_measured_formula() {
        let b = Bandwidth::measured(1_000_000, Duration::from_millis(4), 4);
        assert!((b.bytes_per_sec() - 1e9).abs() < 1.0);
        assert!((b.gb_per_sec() - 1.0).abs() < 1e-9);
        assert!((b.mb_per_sec() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_measured_zero_duration_is_finite() {
        let b = Bandwidth::measured(4096, Duration::ZERO, 3);
        assert!(positive_finite(b));
    }

    #[test]
    fn test_from_mb_per_sec() {
        assert_eq!(Bandwidth::from_mb_per_sec(950.0).mb_per_sec(), 950.0);
    }

    #[test]
    fn test_read_positive() {
        let data = vec![1.0f64; 4096];
        let out = read_bandwidth(&data, 3).unwrap();
        assert!(positive_finite(out.bandwidth));
        assert_eq!(out.checksum, 4096.0);
    }

    #[test]
    fn test_write_fills_indices() {
        let mut data = vec![0.0f64; 1000];
        let b = write_bandwidth(&mut data, 2).unwrap();
        assert!(positive_finite(b));
        assert!(data.iter().enumerate().all(|(i, &x)| x == i as f64));
    }

    #[test]
    fn test_copy_copies() {
        let src: Vec<u8> = (0..=255u8).cycle().take(8192).collect();
        let mut dst = vec![0u8; 8192];
        let b = copy_bandwidth(&mut dst, &src, 2).unwrap();
        assert!(positive_finite(b));
        assert_eq!(dst, src);
    }

    #[test]
    fn test_write_then_read() {
        let mut data = vec![0.0f64; 2048];
        write_bandwidth(&mut data, 1).unwrap();
        let out = read_bandwidth(&data, 1).unwrap();
        assert!(positive_finite(out.bandwidth));
        assert_eq!(out.checksum, (0..2048).map(|i| i as f64).sum::<f64>());
    }

    #[test]
    fn test_single_element_region() {
        let data = [3.0f64];
        assert!(positive_finite(read_bandwidth(&data, 1).unwrap().bandwidth));
    }

    #[test]
    fn test_empty_region() {
        assert!(matches!(read_bandwidth(&[], 1), Err(ProbeError::EmptyRegion)));
        assert!(matches!(
            copy_bandwidth(&mut [], &[], 1),
            Err(ProbeError::EmptyRegion)
        ));
    }

    #[test]
    fn test_zero_iterations() {
        let mut data = vec![0.0f64; 8];
        assert!(matches!(
            write_bandwidth(&mut data, 0),
            Err(ProbeError::ZeroIterations)
        ));
    }

    #[test]
    fn test_copy_length_mismatch() {
        let src = vec![0u8; 16];
        let mut dst = vec![0u8; 8];
        assert!(matches!(
            copy_bandwidth(&mut dst, &src, 1),
            Err(ProbeError::LengthMismatch { src_bytes: 16, dst_bytes: 8 })
        ));
    }
}
