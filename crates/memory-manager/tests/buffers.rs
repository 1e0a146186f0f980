// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: sizing, allocating and viewing a buffer pair the way a
//! benchmark run does.

use memory_manager::{BufferPair, ByteSize, MemoryError, ALIGN, PAGE_SIZE};

// ── Helpers ────────────────────────────────────────────────────

fn touched_pair(kb: usize) -> BufferPair {
    let capacity = ByteSize::from_kb(kb).unwrap();
    let mut pair = BufferPair::allocate(capacity.as_bytes()).unwrap();
    pair.touch();
    pair
}

// ── Allocation ─────────────────────────────────────────────────

#[test]
fn pair_is_aligned_and_fully_committed() {
    let mut pair = BufferPair::allocate(256 * 1024).unwrap();
    let pages = pair.touch();

    let per_buffer = (pair.len() + PAGE_SIZE - 1) / PAGE_SIZE;
    assert_eq!(pages, 2 * per_buffer);
    assert_eq!(pair.primary().as_ptr() as usize % ALIGN, 0);
    assert_eq!(pair.secondary().as_ptr() as usize % ALIGN, 0);

    // Primary and secondary carry different touch markers.
    assert_eq!(pair.primary().as_slice()[PAGE_SIZE], 1);
    assert_eq!(pair.secondary().as_slice()[PAGE_SIZE], 2);
}

#[test]
fn parsed_size_drives_allocation() {
    let capacity: ByteSize = "512K".parse().unwrap();
    let pair = BufferPair::allocate(capacity.as_bytes()).unwrap();
    assert_eq!(pair.len(), 512 * 1024 + ALIGN);
}

#[test]
fn zero_and_overflowing_sizes_rejected() {
    assert!(matches!(
        BufferPair::allocate(0),
        Err(MemoryError::ZeroSizedAllocation)
    ));
    assert!(BufferPair::allocate(usize::MAX - 1).is_err());
}

// ── Views ──────────────────────────────────────────────────────

#[test]
fn typed_views_share_the_same_bytes() {
    let mut pair = touched_pair(4);

    let doubles = pair.primary_mut().as_f64_slice_mut(4096).unwrap();
    assert_eq!(doubles.len(), 512);
    doubles.iter_mut().for_each(|d| *d = 0.0);
    doubles[3] = 2.5;

    let ro = pair.primary().as_f64_slice(4096).unwrap();
    assert_eq!(ro[3], 2.5);
    assert_eq!(pair.primary().prefix(32).unwrap()[24..32], 2.5f64.to_ne_bytes());
}

#[test]
fn slack_past_capacity_is_addressable() {
    let mut pair = touched_pair(4);
    let len = pair.len();
    let words = pair.primary_mut().as_usize_slice_mut(len).unwrap();
    *words.last_mut().unwrap() = 99;
    assert!(pair.primary_mut().as_usize_slice_mut(len + 1).is_err());
}

#[test]
fn copy_between_halves() {
    let mut pair = touched_pair(64);
    let bytes = 64 * 1024;

    let (primary, secondary) = pair.split_mut();
    primary.prefix_mut(bytes).unwrap().fill(0xAB);
    secondary
        .prefix_mut(bytes)
        .unwrap()
        .copy_from_slice(primary.prefix(bytes).unwrap());

    assert!(pair.secondary().prefix(bytes).unwrap().iter().all(|&b| b == 0xAB));
}
