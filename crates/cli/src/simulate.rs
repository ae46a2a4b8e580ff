// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::shared_rng;
use anyhow::{bail, Result};
use num_bigint::BigInt;
use pot_config::PotConfig;
use pot_lifecycle::{ProfileLifecycleManager, VerifierParameterSet, NUM_PROFILES};
use pot_polynomial::interpolate_at_zero;
use pot_profile::AlgorithmRegistry;
use tracing::info;

/// Runs `init` followed by `renewals` rotations on one path, checking after
/// every step that the shares handed to the hops recombine to the verifier's
/// secret in every slot.
pub fn simulate(
    config: &PotConfig,
    path_id: &str,
    hops: usize,
    renewals: usize,
    seed: Option<u64>,
) -> Result<VerifierParameterSet> {
    let registry = AlgorithmRegistry::with_defaults(shared_rng(seed));
    let manager = ProfileLifecycleManager::from_registry(&registry, config.clone())?;

    manager.init(path_id, hops)?;
    check_reconstruction(&manager, path_id, 0)?;

    let mut active = 0;
    for step in 1..=renewals {
        active = manager.renew(path_id, hops, active)?;
        check_reconstruction(&manager, path_id, active)?;
        info!(step, active, "Renewal verified");
    }

    Ok(manager.verifier_parameters(path_id, active)?)
}

fn check_reconstruction(
    manager: &ProfileLifecycleManager,
    path_id: &str,
    active: usize,
) -> Result<()> {
    let verifier = manager.verifier_parameters(path_id, active)?;
    let hops = verifier
        .profiles
        .first()
        .map(|p| p.lagrange_coefficients.len())
        .unwrap_or_default();

    let mut shares: Vec<Vec<BigInt>> = vec![Vec::with_capacity(hops); NUM_PROFILES];
    let mut secrets: Vec<Option<BigInt>> = vec![None; NUM_PROFILES];
    for position in 0..hops {
        for params in manager.hop_parameters(path_id, position)? {
            shares[params.profile_index].push(params.share);
            if params.secret.is_some() {
                secrets[params.profile_index] = params.secret;
            }
        }
    }

    for profile in &verifier.profiles {
        let index = profile.profile_index;
        let recombined = interpolate_at_zero(
            &shares[index],
            &profile.lagrange_coefficients,
            &profile.prime,
        );
        if secrets[index].as_ref() != Some(&recombined) {
            bail!("Profile {index} of path '{path_id}' failed to reconstruct its secret");
        }
    }
    Ok(())
}

pub fn execute(
    config: &PotConfig,
    path_id: &str,
    hops: usize,
    renewals: usize,
    seed: Option<u64>,
) -> Result<()> {
    let params = simulate(config, path_id, hops, renewals, seed)?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_rotates_slots() -> Result<()> {
        let config = PotConfig::default();
        let params = simulate(&config, "rsp-A", 4, 3, Some(42))?;
        assert_eq!(params.active_index, 1);
        assert_eq!(params.profiles.len(), NUM_PROFILES);
        assert!(params.profiles.iter().all(|p| p.coefficients.len() == 3));
        Ok(())
    }

    #[test]
    fn test_simulate_without_renewals() -> Result<()> {
        let params = simulate(&PotConfig::default(), "rsp-A", 2, 0, Some(1))?;
        assert_eq!(params.active_index, 0);
        Ok(())
    }

    #[test]
    fn test_simulate_rejects_short_chain() {
        assert!(simulate(&PotConfig::default(), "rsp-A", 1, 0, Some(1)).is_err());
    }
}
