// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The benchmark run: merge configuration, allocate, probe every tier, print.
//!
//! ```text
//! file / defaults → flag overrides → validate → BenchRunner::new → run → render
//! ```

use anyhow::Context;
use memory_manager::ByteSize;
use std::path::{Path, PathBuf};
use tier_runner::{report, BenchConfig, BenchRunner};

/// Flags that shape a run. Unset flags keep the file or default value.
#[derive(Debug, Default, clap::Args)]
pub struct RunArgs {
    /// Bandwidth repetitions per tier [default: 3].
    #[arg(long, value_name = "N")]
    pub iters: Option<u32>,

    /// Pointer-chase stride, e.g. 64, 128B, 4K [default: 64].
    #[arg(long, value_name = "BYTES")]
    pub stride: Option<ByteSize>,

    /// L1 tier size in KB [default: 32].
    #[arg(long = "l1KB", value_name = "KB")]
    pub l1_kb: Option<usize>,

    /// L2 tier size in KB [default: 512].
    #[arg(long = "l2KB", value_name = "KB")]
    pub l2_kb: Option<usize>,

    /// L3 tier size in KB [default: 8192].
    #[arg(long = "l3KB", value_name = "KB")]
    pub l3_kb: Option<usize>,

    /// Memory tier size in KB [default: 131072].
    #[arg(long = "memKB", value_name = "KB")]
    pub mem_kb: Option<usize>,

    /// Fast run: 2 iterations, memory tier capped at 64 MB.
    #[arg(long)]
    pub quick: bool,
}

impl RunArgs {
    /// Builds the raw configuration: file (or defaults), then flags on top.
    pub fn to_config(&self, config_path: Option<&Path>) -> anyhow::Result<BenchConfig> {
        let mut config = match config_path {
            Some(path) => {
                tracing::info!("loading configuration from {}", path.display());
                BenchConfig::from_file(path)?
            }
            None => BenchConfig::default(),
        };

        if let Some(iters) = self.iters {
            config.iters = iters;
        }
        if let Some(stride) = self.stride {
            config.stride = stride;
        }
        if let Some(kb) = self.l1_kb {
            config.l1_kb = kb;
        }
        if let Some(kb) = self.l2_kb {
            config.l2_kb = kb;
        }
        if let Some(kb) = self.l3_kb {
            config.l3_kb = kb;
        }
        if let Some(kb) = self.mem_kb {
            config.mem_kb = kb;
        }
        config.quick |= self.quick;

        Ok(config)
    }
}

pub fn execute(config_path: Option<PathBuf>, args: RunArgs) -> anyhow::Result<()> {
    let config = args
        .to_config(config_path.as_deref())?
        .validate()
        .context("invalid benchmark configuration")?;

    let mut runner = BenchRunner::new(config).context("buffer allocation failed")?;
    let run = runner.run()?;

    print!("{}", report::render(&run));
    Ok(())
}
