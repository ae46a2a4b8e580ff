// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{serde_decimal, PotAlgorithm, ProfileError, MIN_HOP_COUNT};
use num_bigint::BigInt;
use num_traits::Zero;
use pot_polynomial::interpolate_at_zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One generated profile. Immutable once built.
///
/// Invariants:
/// - `shares`, `lagrange_coefficients` and `blinding_shares` hold `hop_count` values
/// - `coefficients` holds `hop_count - 1` values
/// - every value is in `[0, prime)`
///
/// Deserialization checks the same invariants as [`ProfileSnapshot::from_parts`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedSnapshot")]
pub struct ProfileSnapshot {
    algorithm: PotAlgorithm,
    hop_count: usize,
    #[serde(with = "serde_decimal")]
    prime: BigInt,
    #[serde(with = "serde_decimal")]
    secret: BigInt,
    #[serde(with = "serde_decimal::vec")]
    coefficients: Vec<BigInt>,
    #[serde(with = "serde_decimal::vec")]
    shares: Vec<BigInt>,
    #[serde(with = "serde_decimal::vec")]
    lagrange_coefficients: Vec<BigInt>,
    #[serde(with = "serde_decimal::vec")]
    blinding_shares: Vec<BigInt>,
}

/// Wire form of a [`ProfileSnapshot`], validated by `TryFrom`.
#[derive(Deserialize)]
struct UncheckedSnapshot {
    algorithm: PotAlgorithm,
    hop_count: usize,
    #[serde(with = "serde_decimal")]
    prime: BigInt,
    #[serde(with = "serde_decimal")]
    secret: BigInt,
    #[serde(with = "serde_decimal::vec")]
    coefficients: Vec<BigInt>,
    #[serde(with = "serde_decimal::vec")]
    shares: Vec<BigInt>,
    #[serde(with = "serde_decimal::vec")]
    lagrange_coefficients: Vec<BigInt>,
    #[serde(with = "serde_decimal::vec")]
    blinding_shares: Vec<BigInt>,
}

impl TryFrom<UncheckedSnapshot> for ProfileSnapshot {
    type Error = ProfileError;

    fn try_from(raw: UncheckedSnapshot) -> Result<Self, Self::Error> {
        let snapshot = Self {
            algorithm: raw.algorithm,
            hop_count: raw.hop_count,
            prime: raw.prime,
            secret: raw.secret,
            coefficients: raw.coefficients,
            shares: raw.shares,
            lagrange_coefficients: raw.lagrange_coefficients,
            blinding_shares: raw.blinding_shares,
        };
        snapshot.check_invariants()?;
        Ok(snapshot)
    }
}

/// Fields of a [`ProfileSnapshot`] before validation.
#[derive(Clone, Debug)]
pub struct ProfileParts {
    pub algorithm: PotAlgorithm,
    pub prime: BigInt,
    pub secret: BigInt,
    pub coefficients: Vec<BigInt>,
    pub shares: Vec<BigInt>,
    pub lagrange_coefficients: Vec<BigInt>,
    pub blinding_shares: Vec<BigInt>,
}

impl ProfileSnapshot {
    /// Builds a snapshot, checking every invariant. The hop count is taken from the
    /// number of shares.
    pub fn from_parts(parts: ProfileParts) -> Result<Self, ProfileError> {
        let snapshot = Self {
            algorithm: parts.algorithm,
            hop_count: parts.shares.len(),
            prime: parts.prime,
            secret: parts.secret,
            coefficients: parts.coefficients,
            shares: parts.shares,
            lagrange_coefficients: parts.lagrange_coefficients,
            blinding_shares: parts.blinding_shares,
        };
        snapshot.check_invariants()?;
        Ok(snapshot)
    }

    /// Verifies the length and range invariants.
    pub fn check_invariants(&self) -> Result<(), ProfileError> {
        let invalid = |message: String| Err(ProfileError::InvalidSnapshot { message });

        if self.hop_count < MIN_HOP_COUNT {
            return Err(ProfileError::InvalidHopCount {
                hop_count: self.hop_count,
            });
        }
        if self.shares.len() != self.hop_count {
            return invalid(format!(
                "expected {} shares, found {}",
                self.hop_count,
                self.shares.len()
            ));
        }
        if self.lagrange_coefficients.len() != self.hop_count {
            return invalid(format!(
                "expected {} lagrange coefficients, found {}",
                self.hop_count,
                self.lagrange_coefficients.len()
            ));
        }
        if self.blinding_shares.len() != self.hop_count {
            return invalid(format!(
                "expected {} blinding shares, found {}",
                self.hop_count,
                self.blinding_shares.len()
            ));
        }
        if self.coefficients.len() != self.hop_count - 1 {
            return invalid(format!(
                "expected {} coefficients, found {}",
                self.hop_count - 1,
                self.coefficients.len()
            ));
        }

        let in_field = |v: &BigInt| *v >= BigInt::zero() && *v < self.prime;
        let all_in_field = in_field(&self.secret)
            && self.coefficients.iter().all(in_field)
            && self.shares.iter().all(in_field)
            && self.lagrange_coefficients.iter().all(in_field)
            && self.blinding_shares.iter().all(in_field);
        if !all_in_field {
            return invalid(format!("values must lie in [0, {})", self.prime));
        }

        Ok(())
    }

    pub fn algorithm(&self) -> PotAlgorithm {
        self.algorithm
    }

    pub fn hop_count(&self) -> usize {
        self.hop_count
    }

    pub fn prime(&self) -> &BigInt {
        &self.prime
    }

    pub fn secret(&self) -> &BigInt {
        &self.secret
    }

    /// Public coefficients `a_1 .. a_{hop_count-1}`. The secret is never part of this slice.
    pub fn coefficients(&self) -> &[BigInt] {
        &self.coefficients
    }

    pub fn shares(&self) -> &[BigInt] {
        &self.shares
    }

    pub fn lagrange_coefficients(&self) -> &[BigInt] {
        &self.lagrange_coefficients
    }

    /// Evaluations of the blinding polynomial at each hop's point.
    pub fn blinding_shares(&self) -> &[BigInt] {
        &self.blinding_shares
    }

    pub fn share(&self, hop_position: usize) -> Option<&BigInt> {
        self.shares.get(hop_position)
    }

    /// Position of the verifier (decapsulating) hop.
    pub fn verifier_position(&self) -> usize {
        self.hop_count - 1
    }

    pub fn is_verifier(&self, hop_position: usize) -> bool {
        hop_position == self.verifier_position()
    }

    /// Recombines the shares: `sum_i shares[i] * lagrange_coefficients[i] mod prime`.
    pub fn reconstruct_secret(&self) -> BigInt {
        interpolate_at_zero(&self.shares, &self.lagrange_coefficients, &self.prime)
    }

    /// True when the shares recombine into the stored secret.
    pub fn verify_reconstruction(&self) -> bool {
        self.reconstruct_secret() == self.secret
    }
}

impl fmt::Debug for ProfileSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileSnapshot")
            .field("algorithm", &self.algorithm)
            .field("hop_count", &self.hop_count)
            .field("prime_bits", &self.prime.bits())
            .field("secret", &"<redacted>")
            .field("shares", &"<redacted>")
            .finish_non_exhaustive()
    }
}
