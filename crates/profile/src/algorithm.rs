// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Proof-of-Transit verification algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PotAlgorithm {
    /// Shamir style polynomial secret sharing over a prime field
    #[default]
    Polynomial,
}

impl PotAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [PotAlgorithm; 1] = [PotAlgorithm::Polynomial];

    pub fn as_str(&self) -> &'static str {
        match self {
            PotAlgorithm::Polynomial => "polynomial",
        }
    }
}

impl fmt::Display for PotAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PotAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PotAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown proof-of-transit algorithm '{s}'"))
    }
}
