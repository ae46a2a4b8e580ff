// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::PathId;
use pot_profile::ProfileError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Invalid hop count {hop_count}: at least 2 hops are required")]
    InvalidHopCount { hop_count: usize },

    #[error("No profile set found for path '{path_id}'")]
    ProfileSetNotFound { path_id: PathId },

    #[error("Profile generation failed: {0}")]
    GenerationFailure(ProfileError),

    #[error("Profile index {index} is out of range, each path holds {len} profiles")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Hop position {hop_position} is out of range for a chain of {hop_count} hops")]
    HopPositionOutOfRange {
        hop_position: usize,
        hop_count: usize,
    },

    #[error("Hop count {actual} does not match the {expected} hops of the stored profile set")]
    HopCountMismatch { expected: usize, actual: usize },
}

impl From<ProfileError> for LifecycleError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::InvalidHopCount { hop_count } => Self::InvalidHopCount { hop_count },
            other => Self::GenerationFailure(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pot_profile::PotAlgorithm;

    #[test]
    fn test_profile_error_mapping() {
        assert_eq!(
            LifecycleError::from(ProfileError::InvalidHopCount { hop_count: 1 }),
            LifecycleError::InvalidHopCount { hop_count: 1 }
        );
        assert!(matches!(
            LifecycleError::from(ProfileError::UnknownAlgorithm(PotAlgorithm::Polynomial)),
            LifecycleError::GenerationFailure(ProfileError::UnknownAlgorithm(_))
        ));
    }
}
