// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use num_bigint::BigInt;
use pot_config::RefreshPeriod;
use pot_profile::{serde_decimal, ProfileSnapshot};
use serde::{Deserialize, Serialize};

/// What one hop needs for one profile slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopParameters {
    pub profile_index: usize,
    #[serde(with = "serde_decimal")]
    pub share: BigInt,
    /// Only set for the verifier, the last hop of the chain.
    #[serde(
        with = "serde_decimal::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub secret: Option<BigInt>,
}

impl HopParameters {
    pub(crate) fn from_snapshot(
        profile_index: usize,
        hop_position: usize,
        snapshot: &ProfileSnapshot,
    ) -> Option<Self> {
        let share = snapshot.share(hop_position)?.clone();
        let secret = snapshot
            .is_verifier(hop_position)
            .then(|| snapshot.secret().clone());
        Some(Self {
            profile_index,
            share,
            secret,
        })
    }
}

/// What the verifier needs to check one profile slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierParameters {
    pub profile_index: usize,
    #[serde(with = "serde_decimal")]
    pub prime: BigInt,
    #[serde(with = "serde_decimal::vec")]
    pub coefficients: Vec<BigInt>,
    #[serde(with = "serde_decimal::vec")]
    pub lagrange_coefficients: Vec<BigInt>,
}

impl VerifierParameters {
    pub(crate) fn from_snapshot(profile_index: usize, snapshot: &ProfileSnapshot) -> Self {
        Self {
            profile_index,
            prime: snapshot.prime().clone(),
            coefficients: snapshot.coefficients().to_vec(),
            lagrange_coefficients: snapshot.lagrange_coefficients().to_vec(),
        }
    }
}

/// Verifier parameters for every slot of a path plus the rotation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierParameterSet {
    /// Slot the caller reported as active. Passed through unchanged.
    pub active_index: usize,
    pub refresh_period: RefreshPeriod,
    pub profile_bit_mask: u64,
    pub profiles: Vec<VerifierParameters>,
}

impl VerifierParameterSet {
    pub fn active(&self) -> Option<&VerifierParameters> {
        self.profiles.get(self.active_index)
    }
}
