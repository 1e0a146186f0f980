// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the benchmark runner.

/// Errors that can occur while configuring or running a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Buffer allocation or view failed.
    #[error(transparent)]
    MemoryError(#[from] memory_manager::MemoryError),

    /// A probe rejected its inputs.
    #[error("probe error in tier '{tier}'")]
    ProbeError {
        tier: String,
        #[source]
        source: probe_core::ProbeError,
    },
}
