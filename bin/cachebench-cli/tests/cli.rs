// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! End-to-end tests: run the `cachebench` binary and check its output and
//! exit status.

use std::process::{Command, Output};

// ── Helpers ────────────────────────────────────────────────────

fn cachebench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cachebench"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn cachebench")
}

const SMALL: &[&str] = &[
    "--quick", "--l1KB", "32", "--l2KB", "256", "--l3KB", "1024", "--memKB", "4096",
];

fn numeric_fields(line: &str) -> Vec<f64> {
    line.split_whitespace()
        .filter_map(|tok| tok.parse::<f64>().ok())
        .collect()
}

fn assert_report(stdout: &str) {
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "{stdout}");
    assert_eq!(lines[0], "Cache & Memory Benchmark");
    for (line, label) in lines[1..].iter().zip(["Memory", "L1", "L2", "L3"]) {
        assert!(line.starts_with(label), "{line}");
        let numbers = numeric_fields(line);
        assert_eq!(numbers.len(), 4, "{line}");
        assert!(numbers.iter().all(|&n| n >= 0.0), "{line}");
    }
}

// ── Successful runs ────────────────────────────────────────────

#[test]
fn quick_run_prints_banner_and_four_tiers() {
    let out = cachebench(SMALL);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_report(&String::from_utf8_lossy(&out.stdout));
}

#[test]
fn quick_caps_default_sized_memory_tier() {
    let out = cachebench(&[
        "--quick", "--l1KB", "32", "--l2KB", "512", "--l3KB", "8192", "--memKB", "131072",
    ]);
    assert_eq!(out.status.code(), Some(0));
    assert_report(&String::from_utf8_lossy(&out.stdout));
}

#[test]
fn stride_is_rounded_not_rejected() {
    let mut args = SMALL.to_vec();
    args.extend(["--stride", "10"]);
    let out = cachebench(&args);
    assert!(out.status.success());
    assert_report(&String::from_utf8_lossy(&out.stdout));
}

#[test]
fn verbose_logs_go_to_stderr_only() {
    let mut args = SMALL.to_vec();
    args.push("-vv");
    let out = cachebench(&args);
    assert!(out.status.success());
    assert_report(&String::from_utf8_lossy(&out.stdout));
    assert!(!out.stderr.is_empty());
}

#[test]
fn config_file_supplies_tier_sizes() {
    let path = std::env::temp_dir().join(format!("cachebench-e2e-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "iters = 1\nl1_kb = 16\nl2_kb = 128\nl3_kb = 512\nmem_kb = 2048\n",
    )
    .unwrap();
    let out = cachebench(&["--config", path.to_str().unwrap(), "--iters", "2", "-v"]);
    std::fs::remove_file(&path).ok();

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_report(&String::from_utf8_lossy(&out.stdout));
    assert!(String::from_utf8_lossy(&out.stderr).contains("loading configuration from"));
}

#[test]
fn version_exits_zero() {
    let out = cachebench(&["--version"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("cachebench"));
}

// ── Usage errors ───────────────────────────────────────────────

#[test]
fn help_prints_usage_to_stderr_and_exits_one() {
    for flag in ["--help", "-h"] {
        let out = cachebench(&[flag]);
        assert_eq!(out.status.code(), Some(1));
        assert!(out.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("Usage"), "{stderr}");
        assert!(stderr.contains("--l1KB"));
        assert!(stderr.contains("--quick"));
    }
}

#[test]
fn unknown_flag_exits_one() {
    let out = cachebench(&["--bogus"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_value_exits_one() {
    let out = cachebench(&["--iters"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn unparsable_number_exits_one() {
    let out = cachebench(&["--l1KB", "big"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn zero_iterations_exits_one() {
    let out = cachebench(&["--iters", "0"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn zero_tier_exits_one() {
    let out = cachebench(&["--memKB", "0"]);
    assert_eq!(out.status.code(), Some(1));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn allocation_failure_exits_one_without_measuring() {
    // 4 PiB memory tier: validates, but no allocator can back it.
    let out = cachebench(&["--memKB", "4398046511104"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("allocation failed"), "{stderr}");
    assert_eq!(stderr.matches("could not reserve").count(), 1, "{stderr}");
}

#[test]
fn missing_config_file_exits_one() {
    let out = cachebench(&["--config", "/nonexistent/cachebench.toml"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot read config"));
}
