// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::PotAlgorithm;
use pot_polynomial::PolynomialError;
use thiserror::Error;

/// Errors raised while producing a profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Fewer than two hops cannot share a secret
    #[error("Invalid hop count {hop_count}: at least 2 hops are required")]
    InvalidHopCount { hop_count: usize },

    /// The arithmetic layer could not produce a required value
    #[error("Profile generation failed: {0}")]
    GenerationFailure(#[from] PolynomialError),

    /// Snapshot fields violate the profile invariants
    #[error("Invalid profile snapshot: {message}")]
    InvalidSnapshot { message: String },

    /// No generator is registered for the algorithm
    #[error("No generator registered for algorithm '{0}'")]
    UnknownAlgorithm(PotAlgorithm),
}
