// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cachebench
//!
//! Command-line interface for the cache and memory benchmark.
//!
//! ## Usage
//! ```bash
//! # Fast run: 2 iterations, memory tier capped at 64 MB
//! cachebench --quick
//!
//! # Custom tier sizes and a page-sized chase stride
//! cachebench --l1KB 48 --l2KB 2048 --l3KB 32768 --memKB 262144 --stride 4K
//!
//! # Defaults from a TOML file, flags still win
//! cachebench --config bench.toml --iters 5 -v
//! ```

mod commands;

use clap::error::ErrorKind;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cachebench",
    about = "Quick L1/L2/L3/memory bandwidth and latency benchmark",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (explicit flags override it).
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging on stderr (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    run: commands::run::RunArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::DisplayHelp {
            eprint!("{}", e.render());
        } else {
            let _ = e.print();
        }
        std::process::exit(exit_code(e.kind()));
    });

    commands::init_tracing(cli.verbose);

    commands::run::execute(cli.config, cli.run)
}

/// Exit status for a parse outcome: 0 for `--version`, 1 for help and
/// usage errors.
fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
