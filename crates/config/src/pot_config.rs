// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::RefreshPeriod;
use anyhow::{bail, Context, Result};
use pot_polynomial::{DEFAULT_BIT_WIDTH, MAX_BIT_WIDTH};
use pot_profile::PotAlgorithm;
use serde::{Deserialize, Serialize};

/// Profiles kept per path: one active, one standby.
pub const NUM_PROFILES: usize = 2;

/// The config used throughout the profile engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct PotConfig {
    /// Verification algorithm used to generate profiles
    pub algorithm: PotAlgorithm,
    /// Bit width of the random polynomial coefficients (1..=64)
    pub bit_width: u32,
    /// Profiles per path. Only 2 is supported
    pub num_profiles: usize,
    /// Rotation period handed to verifiers alongside their parameters
    pub refresh_period: RefreshPeriod,
    /// Profile selection bit mask handed to verifiers, not interpreted here
    pub profile_bit_mask: u64,
}

impl Default for PotConfig {
    fn default() -> Self {
        Self {
            algorithm: PotAlgorithm::Polynomial,
            bit_width: DEFAULT_BIT_WIDTH,
            num_profiles: NUM_PROFILES,
            refresh_period: RefreshPeriod::default(),
            profile_bit_mask: 1,
        }
    }
}

impl PotConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bit_width == 0 || self.bit_width > MAX_BIT_WIDTH {
            bail!(
                "bit_width must be between 1 and {}, got {}",
                MAX_BIT_WIDTH,
                self.bit_width
            );
        }

        if self.num_profiles != NUM_PROFILES {
            bail!(
                "num_profiles must be {}, got {}. Profile rotation assumes one active and one standby profile.",
                NUM_PROFILES,
                self.num_profiles
            );
        }

        if self.refresh_period.value == 0 {
            bail!("refresh_period.value must be greater than zero");
        }

        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Could not serialize configuration")
    }
}
