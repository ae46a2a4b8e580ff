// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    HopParameters, LifecycleError, PathId, ProfileSet, ProfileStore, VerifierParameterSet,
    VerifierParameters, NUM_PROFILES,
};
use pot_config::PotConfig;
use pot_profile::{AlgorithmRegistry, ProfileGenerator, ProfileSnapshot, MIN_HOP_COUNT};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Creates, rotates, hands out and removes the profile sets of every path.
///
/// Safe to share between threads behind an `Arc`.
pub struct ProfileLifecycleManager {
    generator: Arc<dyn ProfileGenerator>,
    config: PotConfig,
    store: ProfileStore,
}

impl ProfileLifecycleManager {
    pub fn new(generator: Arc<dyn ProfileGenerator>, config: PotConfig) -> Self {
        Self {
            generator,
            config,
            store: ProfileStore::new(),
        }
    }

    /// Uses the generator registered for `config.algorithm`.
    pub fn from_registry(
        registry: &AlgorithmRegistry,
        config: PotConfig,
    ) -> Result<Self, LifecycleError> {
        let generator = registry.get(config.algorithm)?;
        Ok(Self::new(generator, config))
    }

    pub fn config(&self) -> &PotConfig {
        &self.config
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Generates a fresh set for `path_id`, replacing any existing one.
    ///
    /// Nothing is stored when generation fails.
    #[instrument(skip_all, fields(path_id = %path_id))]
    pub fn init(&self, path_id: &str, hop_count: usize) -> Result<(), LifecycleError> {
        let result = check_hop_count(hop_count).and_then(|_| {
            let profiles = (0..NUM_PROFILES)
                .map(|_| self.generate(hop_count))
                .collect::<Result<Vec<_>, _>>()?;
            ProfileSet::new(profiles)
        });

        let set = result.inspect_err(|err| warn!(error = %err, "Rejected profile set init"))?;
        self.store.put(path_id, set);
        info!(hop_count, profiles = NUM_PROFILES, "Initialized profile set");
        Ok(())
    }

    /// Regenerates the slot after `current_active_index` and returns its index.
    ///
    /// The active slot is left untouched so the dataplane can keep using it
    /// until it switches over.
    #[instrument(skip_all, fields(path_id = %path_id))]
    pub fn renew(
        &self,
        path_id: &str,
        hop_count: usize,
        current_active_index: usize,
    ) -> Result<usize, LifecycleError> {
        let mut new_index = 0;

        self.store
            .update(path_id, |current| {
                let current = current.ok_or_else(|| LifecycleError::ProfileSetNotFound {
                    path_id: path_id.to_string(),
                })?;
                check_hop_count(hop_count)?;
                check_profile_index(current_active_index)?;
                if current.hop_count() != hop_count {
                    return Err(LifecycleError::HopCountMismatch {
                        expected: current.hop_count(),
                        actual: hop_count,
                    });
                }
                new_index = (current_active_index + 1) % NUM_PROFILES;
                let profile = self.generate(hop_count)?;
                current.with_replaced(new_index, profile)
            })
            .inspect_err(|err| warn!(error = %err, "Rejected profile renewal"))?;

        info!(
            hop_count,
            active_index = current_active_index,
            new_index,
            "Renewed profile"
        );
        Ok(new_index)
    }

    /// Parameters for the hop at `hop_position`, one record per slot.
    ///
    /// Only the verifier (the last position) receives the secret.
    #[instrument(skip_all, fields(path_id = %path_id))]
    pub fn hop_parameters(
        &self,
        path_id: &str,
        hop_position: usize,
    ) -> Result<Vec<HopParameters>, LifecycleError> {
        let set = self.load(path_id)?;
        let out_of_range = || LifecycleError::HopPositionOutOfRange {
            hop_position,
            hop_count: set.hop_count(),
        };
        if hop_position >= set.hop_count() {
            let err = out_of_range();
            warn!(error = %err, "Rejected hop parameter request");
            return Err(err);
        }

        set.profiles()
            .iter()
            .enumerate()
            .map(|(index, profile)| {
                HopParameters::from_snapshot(index, hop_position, profile).ok_or_else(&out_of_range)
            })
            .collect()
    }

    #[instrument(skip_all, fields(path_id = %path_id))]
    pub fn verifier_parameters(
        &self,
        path_id: &str,
        active_index_hint: usize,
    ) -> Result<VerifierParameterSet, LifecycleError> {
        check_profile_index(active_index_hint)
            .inspect_err(|err| warn!(error = %err, "Rejected verifier parameter request"))?;
        let set = self.load(path_id)?;

        Ok(VerifierParameterSet {
            active_index: active_index_hint,
            refresh_period: self.config.refresh_period,
            profile_bit_mask: self.config.profile_bit_mask,
            profiles: set
                .profiles()
                .iter()
                .enumerate()
                .map(|(index, profile)| VerifierParameters::from_snapshot(index, profile))
                .collect(),
        })
    }

    /// Removes the set for `path_id`. Returns whether one existed.
    #[instrument(skip_all, fields(path_id = %path_id))]
    pub fn delete(&self, path_id: &str) -> bool {
        let existed = self.store.delete(path_id);
        if existed {
            info!("Deleted profile set");
        } else {
            debug!("No profile set to delete");
        }
        existed
    }

    pub fn hop_count(&self, path_id: &str) -> Option<usize> {
        self.store.get(path_id).map(|set| set.hop_count())
    }

    pub fn paths(&self) -> Vec<PathId> {
        self.store.path_ids()
    }

    pub fn contains(&self, path_id: &str) -> bool {
        self.store.contains(path_id)
    }

    fn load(&self, path_id: &str) -> Result<Arc<ProfileSet>, LifecycleError> {
        self.store.get(path_id).ok_or_else(|| {
            let err = LifecycleError::ProfileSetNotFound {
                path_id: path_id.to_string(),
            };
            warn!(error = %err, "Profile set lookup failed");
            err
        })
    }

    fn generate(&self, hop_count: usize) -> Result<Arc<ProfileSnapshot>, LifecycleError> {
        let profile = self.generator.generate(hop_count, self.config.bit_width)?;
        Ok(Arc::new(profile))
    }
}

fn check_hop_count(hop_count: usize) -> Result<(), LifecycleError> {
    if hop_count < MIN_HOP_COUNT {
        return Err(LifecycleError::InvalidHopCount { hop_count });
    }
    Ok(())
}

fn check_profile_index(index: usize) -> Result<(), LifecycleError> {
    if index >= NUM_PROFILES {
        return Err(LifecycleError::IndexOutOfRange {
            index,
            len: NUM_PROFILES,
        });
    }
    Ok(())
}
