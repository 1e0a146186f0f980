// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tier labels, capacities and per-tier results.

use memory_manager::ByteSize;
use probe_core::Bandwidth;
use std::fmt;

/// A capacity tier. Labels are nominal: nothing checks that an `L2`-sized
/// region actually lives in L2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKind {
    Memory,
    L1,
    L2,
    L3,
}

impl TierKind {
    /// The fixed order tiers are run and reported in.
    pub const RUN_ORDER: [TierKind; 4] = [TierKind::Memory, TierKind::L1, TierKind::L2, TierKind::L3];

    /// Position in [`TierKind::RUN_ORDER`].
    pub fn run_index(self) -> usize {
        match self {
            TierKind::Memory => 0,
            TierKind::L1 => 1,
            TierKind::L2 => 2,
            TierKind::L3 => 3,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            TierKind::Memory => "Memory",
            TierKind::L1 => "L1",
            TierKind::L2 => "L2",
            TierKind::L3 => "L3",
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A tier paired with the working-set size requested for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub kind: TierKind,
    pub capacity: ByteSize,
}

/// The four measurements taken for one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierResult {
    pub tier: Tier,
    pub read: Bandwidth,
    pub write: Bandwidth,
    pub copy: Bandwidth,
    /// Average nanoseconds per random dereference.
    pub latency_ns: f64,
}

impl TierResult {
    /// Tier label shortcut.
    pub fn kind(&self) -> TierKind {
        self.tier.kind
    }
}
