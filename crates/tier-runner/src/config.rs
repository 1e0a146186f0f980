// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmark configuration loaded from TOML files or built from CLI flags.
//!
//! # TOML Format
//! ```toml
//! iters = 3
//! stride = 64
//! l1_kb = 32
//! l2_kb = 512
//! l3_kb = 8192
//! mem_kb = 131072
//! quick = false
//! ```
//!
//! Every key is optional. A [`BenchConfig`] is raw user input; only a
//! [`ValidatedConfig`] (produced by [`BenchConfig::validate`]) can drive a
//! run. Validation rounds the stride, applies quick mode and rejects zero or
//! overflowing sizes.

use crate::{BenchError, Tier, TierKind};
use memory_manager::ByteSize;
use std::path::Path;

/// Default bandwidth repetitions per tier.
pub const DEFAULT_ITERS: u32 = 3;
/// Default latency stride in bytes.
pub const DEFAULT_STRIDE: usize = 64;
/// Iterations forced by quick mode.
pub const QUICK_ITERS: u32 = 2;
/// Memory-tier cap (KiB) in quick mode.
pub const QUICK_MEM_KB: usize = 65_536;

const WORD: usize = std::mem::size_of::<usize>();

/// User-facing benchmark configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Bandwidth-probe repetitions per tier (≥ 1).
    pub iters: u32,
    /// Pointer-chase stride; rounded up to a pointer-width multiple.
    pub stride: ByteSize,
    /// L1 tier capacity in KiB.
    pub l1_kb: usize,
    /// L2 tier capacity in KiB.
    pub l2_kb: usize,
    /// L3 tier capacity in KiB.
    pub l3_kb: usize,
    /// Memory tier capacity in KiB.
    pub mem_kb: usize,
    /// Caps iterations and the memory tier for a fast run.
    pub quick: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iters: DEFAULT_ITERS,
            stride: ByteSize::from_bytes(DEFAULT_STRIDE),
            l1_kb: 32,
            l2_kb: 512,
            l3_kb: 8192,
            mem_kb: 131_072,
            quick: false,
        }
    }
}

impl BenchConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, BenchError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BenchError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, BenchError> {
        toml::from_str(toml_str)
            .map_err(|e| BenchError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, BenchError> {
        toml::to_string_pretty(self)
            .map_err(|e| BenchError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Resolves the configuration into the form a run consumes.
    pub fn validate(&self) -> Result<ValidatedConfig, BenchError> {
        if self.iters == 0 {
            return Err(BenchError::ConfigError("iters must be at least 1".into()));
        }

        let mut iters = self.iters;
        let mut mem_kb = self.mem_kb;
        if self.quick {
            if iters != QUICK_ITERS {
                tracing::info!("quick mode: iters {iters} -> {QUICK_ITERS}");
            }
            iters = QUICK_ITERS;
            if mem_kb > QUICK_MEM_KB {
                tracing::info!("quick mode: memory tier {mem_kb} KB -> {QUICK_MEM_KB} KB");
                mem_kb = QUICK_MEM_KB;
            }
        }

        let stride = round_stride(self.stride.as_bytes())?;

        let tiers = [
            tier(TierKind::Memory, mem_kb)?,
            tier(TierKind::L1, self.l1_kb)?,
            tier(TierKind::L2, self.l2_kb)?,
            tier(TierKind::L3, self.l3_kb)?,
        ];

        Ok(ValidatedConfig {
            iters,
            stride,
            tiers,
            quick: self.quick,
        })
    }
}

fn tier(kind: TierKind, kb: usize) -> Result<Tier, BenchError> {
    if kb == 0 {
        return Err(BenchError::ConfigError(format!(
            "{kind} tier size must be greater than 0 KB"
        )));
    }
    let capacity = ByteSize::from_kb(kb)
        .map_err(|e| BenchError::ConfigError(format!("{kind} tier: {e}")))?;
    Ok(Tier { kind, capacity })
}

/// Rounds a stride up to a multiple of the pointer width.
///
/// Zero resolves to exactly the pointer width.
pub fn round_stride(stride: usize) -> Result<usize, BenchError> {
    if stride == 0 {
        return Ok(WORD);
    }
    stride
        .checked_add(WORD - 1)
        .map(|s| s / WORD * WORD)
        .ok_or_else(|| BenchError::ConfigError(format!("stride {stride} overflows")))
}

/// A configuration that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    iters: u32,
    stride: usize,
    tiers: [Tier; 4],
    quick: bool,
}

impl ValidatedConfig {
    /// Bandwidth repetitions per tier, after quick mode.
    pub fn iters(&self) -> u32 {
        self.iters
    }

    /// Chase stride in bytes, pointer-width aligned.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether quick mode was requested.
    pub fn quick(&self) -> bool {
        self.quick
    }

    /// Tiers in run order: Memory, L1, L2, L3.
    pub fn tiers(&self) -> &[Tier; 4] {
        &self.tiers
    }

    /// The tier of the given kind.
    pub fn tier(&self, kind: TierKind) -> Tier {
        self.tiers[kind.run_index()]
    }

    /// Usable bytes each buffer must provide.
    ///
    /// Covers the largest tier and the two-slot minimum of the chase chain.
    pub fn required_bytes(&self) -> usize {
        let largest = self
            .tiers
            .iter()
            .map(|t| t.capacity.as_bytes())
            .max()
            .unwrap_or(0);
        largest.max(self.stride.saturating_mul(2))
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        let tiers: Vec<String> = self
            .tiers
            .iter()
            .map(|t| format!("{}={}", t.kind, t.capacity))
            .collect();
        format!(
            "iters={} stride={} B quick={} tiers: {}",
            self.iters,
            self.stride,
            self.quick,
            tiers.join(", ")
        )
    }
}
