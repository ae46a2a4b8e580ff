// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::shared_rng;
use anyhow::{Context, Result};
use pot_config::PotConfig;
use pot_profile::{AlgorithmRegistry, ProfileSnapshot};
use tracing::info;

pub fn generate(
    config: &PotConfig,
    hops: usize,
    bit_width: Option<u32>,
    seed: Option<u64>,
) -> Result<ProfileSnapshot> {
    let registry = AlgorithmRegistry::with_defaults(shared_rng(seed));
    let generator = registry.get(config.algorithm)?;
    let bit_width = bit_width.unwrap_or(config.bit_width);
    let profile = generator
        .generate(hops, bit_width)
        .with_context(|| format!("Could not generate a profile for {hops} hops"))?;
    info!(
        algorithm = %config.algorithm,
        hops,
        bit_width,
        "Generated profile"
    );
    Ok(profile)
}

pub fn execute(
    config: &PotConfig,
    hops: usize,
    bit_width: Option<u32>,
    seed: Option<u64>,
) -> Result<()> {
    let profile = generate(config, hops, bit_width, seed)?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
