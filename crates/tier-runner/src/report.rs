// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Human-readable result lines.
//!
//! ```text
//! Cache & Memory Benchmark
//! Memory    Read    14.21 GB/s   Write    9.87 GB/s   Copy    7.02 GB/s   Latency  92.40 ns
//! L1        Read    61.30 GB/s   Write   48.11 GB/s   Copy   55.90 GB/s   Latency   1.21 ns
//! ```

use crate::{RunReport, TierResult};
use probe_core::Bandwidth;

/// First line of every report.
pub const BANNER: &str = "Cache & Memory Benchmark";

/// Formats a MB/s value, switching to GB/s at 1000 MB/s.
pub fn format_mbps(mb_per_sec: f64) -> String {
    if mb_per_sec >= 1000.0 {
        format!("{:>8.2} GB/s", mb_per_sec / 1000.0)
    } else {
        format!("{:>8.2} MB/s", mb_per_sec)
    }
}

/// Formats a bandwidth value.
pub fn format_bandwidth(bandwidth: Bandwidth) -> String {
    format_mbps(bandwidth.mb_per_sec())
}

/// Formats a latency in nanoseconds with two decimals.
pub fn format_latency(ns: f64) -> String {
    format!("{:>6.2} ns", ns)
}

/// Formats one tier's line.
pub fn format_row(result: &TierResult) -> String {
    format!(
        "{:<8}  Read {}   Write {}   Copy {}   Latency {}",
        result.kind().label(),
        format_bandwidth(result.read),
        format_bandwidth(result.write),
        format_bandwidth(result.copy),
        format_latency(result.latency_ns),
    )
}

/// Banner plus one line per tier, newline-terminated.
pub fn render(report: &RunReport) -> String {
    let mut out = String::from(BANNER);
    out.push('\n');
    for result in &report.results {
        out.push_str(&format_row(result));
        out.push('\n');
    }
    out
}
