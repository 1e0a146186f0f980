// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for measurement probes.

/// Precondition violations detected before a probe starts timing.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The region to measure holds no elements.
    #[error("cannot probe an empty region")]
    EmptyRegion,

    /// A bandwidth probe was asked to run zero timed iterations.
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    /// Copy source and destination differ in length.
    #[error("copy length mismatch: source {src_bytes} bytes, destination {dst_bytes} bytes")]
    LengthMismatch { src_bytes: usize, dst_bytes: usize },

    /// The chase stride is zero or not a multiple of the pointer width.
    #[error("invalid stride {stride}: must be a non-zero multiple of {word} bytes")]
    InvalidStride { stride: usize, word: usize },

    /// The chase chain does not fit in the supplied region.
    #[error("chase chain spans {span_bytes} bytes but region holds {region_bytes}")]
    RegionTooSmall {
        span_bytes: usize,
        region_bytes: usize,
    },
}
