// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use num_bigint::BigInt;
use pot_config::PotConfig;
use pot_lifecycle::{ProfileLifecycleManager, NUM_PROFILES};
use pot_profile::{
    PolynomialProfileGenerator, PotAlgorithm, ProfileError, ProfileGenerator, ProfileSnapshot,
};
use pot_test_helpers::{create_shared_rng_from_u64, init_test_tracing, path_ids};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

/// Remembers which thread generated which secret, in generation order.
struct RecordingGenerator {
    inner: PolynomialProfileGenerator,
    log: Mutex<Vec<(ThreadId, BigInt)>>,
}

impl RecordingGenerator {
    fn new(seed: u64) -> Self {
        Self {
            inner: PolynomialProfileGenerator::new(create_shared_rng_from_u64(seed)),
            log: Mutex::new(Vec::new()),
        }
    }
}

impl ProfileGenerator for RecordingGenerator {
    fn algorithm(&self) -> PotAlgorithm {
        PotAlgorithm::Polynomial
    }

    fn generate(&self, hop_count: usize, bit_width: u32) -> Result<ProfileSnapshot, ProfileError> {
        let profile = self.inner.generate(hop_count, bit_width)?;
        self.log
            .lock()
            .unwrap()
            .push((thread::current().id(), profile.secret().clone()));
        Ok(profile)
    }
}

fn setup(seed: u64) -> Arc<ProfileLifecycleManager> {
    let generator = PolynomialProfileGenerator::new(create_shared_rng_from_u64(seed));
    Arc::new(ProfileLifecycleManager::new(
        Arc::new(generator),
        PotConfig::default(),
    ))
}

#[test]
fn test_parallel_renew_and_read_same_path() -> Result<()> {
    let _guard = init_test_tracing();
    let recorder = Arc::new(RecordingGenerator::new(1));
    let manager = ProfileLifecycleManager::new(recorder.clone(), PotConfig::default());
    manager.init("rsp-A", 5)?;

    const WRITERS: usize = 4;
    const ROUNDS: usize = 25;

    // Writer `w` always reports slot `w % 2` as active, so it only ever
    // replaces slot `(w + 1) % 2`
    let written_slot: HashMap<ThreadId, usize> = thread::scope(|s| {
        let writers: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let manager = &manager;
                s.spawn(move || {
                    let active = writer % NUM_PROFILES;
                    for _ in 0..ROUNDS {
                        let slot = manager.renew("rsp-A", 5, active).unwrap();
                        assert_eq!(slot, (active + 1) % NUM_PROFILES);
                    }
                    (thread::current().id(), (active + 1) % NUM_PROFILES)
                })
            })
            .collect();

        for _ in 0..4 {
            let manager = &manager;
            s.spawn(move || {
                for _ in 0..100 {
                    let set = manager.store().get("rsp-A").unwrap();
                    assert_eq!(set.profiles().len(), NUM_PROFILES);
                    assert!(set.profiles().iter().all(|p| p.hop_count() == 5));
                    assert!(set.profiles().iter().all(|p| p.verify_reconstruction()));

                    let params = manager.verifier_parameters("rsp-A", 0).unwrap();
                    assert_eq!(params.profiles.len(), NUM_PROFILES);
                    assert!(params
                        .profiles
                        .iter()
                        .all(|p| p.lagrange_coefficients.len() == 5));
                }
            });
        }

        writers.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let log = recorder.log.lock().unwrap();
    assert_eq!(log.len(), NUM_PROFILES + WRITERS * ROUNDS);

    // Renewals generate under the path's writer lock, so the log order is the
    // commit order and the last secret logged for a slot must be the stored one
    let set = manager.store().get("rsp-A").unwrap();
    for slot in 0..NUM_PROFILES {
        let last = log
            .iter()
            .rev()
            .find(|(thread, _)| written_slot.get(thread) == Some(&slot))
            .map(|(_, secret)| secret);
        assert_eq!(last, Some(set.profiles()[slot].secret()));
    }
    Ok(())
}

#[test]
fn test_parallel_distinct_paths() {
    let _guard = init_test_tracing();
    let manager = setup(2);
    let ids = path_ids("rsp", 16);

    thread::scope(|s| {
        for (i, id) in ids.iter().enumerate() {
            let manager = &manager;
            s.spawn(move || {
                let hop_count = 2 + i % 6;
                manager.init(id, hop_count).unwrap();
                let mut active = 0;
                for _ in 0..5 {
                    active = manager.renew(id, hop_count, active).unwrap();
                }
                let hops = manager.hop_parameters(id, hop_count - 1).unwrap();
                assert!(hops.iter().all(|p| p.secret.is_some()));
            });
        }
    });

    let mut expected = ids.clone();
    expected.sort();
    assert_eq!(manager.paths(), expected);
}

#[test]
fn test_parallel_init_and_delete() {
    let _guard = init_test_tracing();
    let manager = setup(3);

    thread::scope(|s| {
        for _ in 0..4 {
            let manager = &manager;
            s.spawn(move || {
                for _ in 0..20 {
                    manager.init("rsp-A", 3).unwrap();
                    manager.delete("rsp-A");
                }
            });
        }
        let manager = &manager;
        s.spawn(move || {
            for _ in 0..100 {
                if let Some(set) = manager.store().get("rsp-A") {
                    assert_eq!(set.profiles().len(), NUM_PROFILES);
                }
            }
        });
    });

    manager.init("rsp-A", 4).unwrap();
    assert_eq!(manager.hop_count("rsp-A"), Some(4));
    assert_eq!(manager.paths(), vec!["rsp-A"]);
}
