// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Byte-size values and human-readable parsing.
//!
//! A [`ByteSize`] is used for the latency stride and for reporting buffer
//! footprints. It supports human-readable string parsing for CLI ergonomics.

use crate::MemoryError;
use std::fmt;
use std::str::FromStr;

const KIB: usize = 1024;
const MIB: usize = 1024 * 1024;
const GIB: usize = 1024 * 1024 * 1024;

/// A byte count with binary-suffix parsing and display.
///
/// # Parsing
/// - `"64"` → 64 bytes
/// - `"4K"` or `"4KB"` → 4 × 1024 bytes
/// - `"2M"` or `"2MB"` → 2 × 1024² bytes
/// - `"1G"` or `"1GB"` → 1 × 1024³ bytes
///
/// Zero is a valid size: a zero stride resolves to the pointer width later on.
///
/// # Examples
/// ```
/// use memory_manager::ByteSize;
///
/// let s = ByteSize::parse("4K").unwrap();
/// assert_eq!(s.as_bytes(), 4096);
/// assert_eq!(s.to_string(), "4 KB");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ByteSize {
    bytes: usize,
}

impl ByteSize {
    /// Creates a size from a byte count.
    pub const fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Creates a size from kibibytes, failing on overflow.
    pub fn from_kb(kb: usize) -> Result<Self, MemoryError> {
        kb.checked_mul(KIB)
            .map(Self::from_bytes)
            .ok_or_else(|| MemoryError::InvalidSize(format!("{kb} KB overflows usize")))
    }

    /// Returns the size in bytes.
    pub const fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Returns the size in kibibytes (truncated).
    pub const fn as_kb(&self) -> usize {
        self.bytes / KIB
    }

    /// Parses `<digits>[B|K|KB|M|MB|G|GB]`. The unit is case-insensitive
    /// and may be separated from the number by spaces.
    pub fn parse(s: &str) -> Result<Self, MemoryError> {
        let s = s.trim();
        let (digits, unit) = s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len()));
        let malformed = || {
            MemoryError::InvalidSize(format!(
                "'{s}': expected digits with an optional B, K, M or G suffix"
            ))
        };
        let overflow = || MemoryError::InvalidSize(format!("'{s}' overflows usize"));

        if digits.is_empty() {
            return Err(malformed());
        }
        let multiplier = match unit.trim_start().to_ascii_uppercase().as_str() {
            "" | "B" => 1,
            "K" | "KB" => KIB,
            "M" | "MB" => MIB,
            "G" | "GB" => GIB,
            _ => return Err(malformed()),
        };

        // Only digits remain, so a parse failure means the value is too large.
        let value: usize = digits.parse().map_err(|_| overflow())?;
        value
            .checked_mul(multiplier)
            .map(Self::from_bytes)
            .ok_or_else(overflow)
    }
}

impl FromStr for ByteSize {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bytes >= GIB && self.bytes % GIB == 0 {
            write!(f, "{} GB", self.bytes / GIB)
        } else if self.bytes >= MIB && self.bytes % MIB == 0 {
            write!(f, "{} MB", self.bytes / MIB)
        } else if self.bytes >= KIB && self.bytes % KIB == 0 {
            write!(f, "{} KB", self.bytes / KIB)
        } else {
            write!(f, "{} B", self.bytes)
        }
    }
}
