// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{LifecycleError, NUM_PROFILES};
use pot_profile::ProfileSnapshot;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Identifier of a rendered service path.
pub type PathId = String;

/// The profiles of one path, indexed by slot.
///
/// Always holds exactly [`NUM_PROFILES`] valid profiles built for the same hop count.
#[derive(Debug, Clone)]
pub struct ProfileSet {
    hop_count: usize,
    profiles: Vec<Arc<ProfileSnapshot>>,
}

impl ProfileSet {
    pub fn new(profiles: Vec<Arc<ProfileSnapshot>>) -> Result<Self, LifecycleError> {
        if profiles.len() != NUM_PROFILES {
            return Err(LifecycleError::IndexOutOfRange {
                index: profiles.len(),
                len: NUM_PROFILES,
            });
        }

        for profile in &profiles {
            profile.check_invariants()?;
        }

        let hop_count = profiles[0].hop_count();
        if let Some(other) = profiles.iter().find(|p| p.hop_count() != hop_count) {
            return Err(LifecycleError::HopCountMismatch {
                expected: hop_count,
                actual: other.hop_count(),
            });
        }

        Ok(Self {
            hop_count,
            profiles,
        })
    }

    pub fn hop_count(&self) -> usize {
        self.hop_count
    }

    pub fn profiles(&self) -> &[Arc<ProfileSnapshot>] {
        &self.profiles
    }

    pub fn profile(&self, index: usize) -> Option<&Arc<ProfileSnapshot>> {
        self.profiles.get(index)
    }

    /// Copy of this set with slot `index` replaced. Other slots keep their `Arc`.
    pub fn with_replaced(
        &self,
        index: usize,
        profile: Arc<ProfileSnapshot>,
    ) -> Result<Self, LifecycleError> {
        if index >= self.profiles.len() {
            return Err(LifecycleError::IndexOutOfRange {
                index,
                len: self.profiles.len(),
            });
        }
        if profile.hop_count() != self.hop_count {
            return Err(LifecycleError::HopCountMismatch {
                expected: self.hop_count,
                actual: profile.hop_count(),
            });
        }

        profile.check_invariants()?;

        let mut profiles = self.profiles.clone();
        profiles[index] = profile;
        Ok(Self {
            hop_count: self.hop_count,
            profiles,
        })
    }
}

#[derive(Default)]
struct PathEntry {
    /// Writer lock. `true` once the entry was removed from the store.
    retired: Mutex<bool>,
    current: RwLock<Option<Arc<ProfileSet>>>,
}

impl PathEntry {
    fn load(&self) -> Option<Arc<ProfileSet>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, set: Option<Arc<ProfileSet>>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = set;
    }

    fn lock_writer(&self) -> MutexGuard<'_, bool> {
        self.retired.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-memory profile sets keyed by path.
///
/// The map lock is only held to look up or create a path entry. Writes to one
/// path are serialized by that path's own lock, so work on different paths never
/// waits on each other. Readers get the published `Arc` and never see a half
/// written set.
#[derive(Default)]
pub struct ProfileStore {
    entries: RwLock<HashMap<PathId, Arc<PathEntry>>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path_id: &str) -> Option<Arc<ProfileSet>> {
        self.entry(path_id)?.load()
    }

    /// Replaces the whole set stored for `path_id`.
    pub fn put(&self, path_id: &str, set: ProfileSet) -> Arc<ProfileSet> {
        let set = Arc::new(set);
        self.with_writer(path_id, |entry, _| entry.publish(Some(set.clone())));
        set
    }

    /// Runs `f` on the current set while holding the path's writer lock and
    /// publishes the set it returns. Nothing is published when `f` fails.
    pub fn update<F, E>(&self, path_id: &str, f: F) -> Result<Arc<ProfileSet>, E>
    where
        F: FnOnce(Option<&ProfileSet>) -> Result<ProfileSet, E>,
    {
        self.with_writer(path_id, |entry, retired| {
            let current = entry.load();
            match f(current.as_deref()) {
                Ok(next) => {
                    let next = Arc::new(next);
                    entry.publish(Some(next.clone()));
                    Ok(next)
                }
                Err(err) => {
                    if current.is_none() {
                        self.retire(path_id, entry, retired);
                    }
                    Err(err)
                }
            }
        })
    }

    /// Removes the set stored for `path_id`. Returns whether one existed.
    pub fn delete(&self, path_id: &str) -> bool {
        loop {
            let Some(entry) = self.entry(path_id) else {
                return false;
            };
            let mut retired = entry.lock_writer();
            if *retired {
                continue;
            }
            let existed = entry.load().is_some();
            self.retire(path_id, &entry, &mut *retired);
            return existed;
        }
    }

    pub fn contains(&self, path_id: &str) -> bool {
        self.get(path_id).is_some()
    }

    /// Sorted ids of every path holding a set.
    pub fn path_ids(&self) -> Vec<PathId> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<PathId> = entries
            .iter()
            .filter(|(_, entry)| entry.load().is_some())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .values()
            .filter(|entry| entry.load().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, path_id: &str) -> Option<Arc<PathEntry>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path_id)
            .cloned()
    }

    fn entry_or_insert(&self, path_id: &str) -> Arc<PathEntry> {
        if let Some(entry) = self.entry(path_id) {
            return entry;
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(path_id.to_string())
            .or_default()
            .clone()
    }

    /// Runs `f` with the writer lock of a live entry for `path_id`.
    fn with_writer<T>(&self, path_id: &str, f: impl FnOnce(&PathEntry, &mut bool) -> T) -> T {
        loop {
            let entry = self.entry_or_insert(path_id);
            let mut retired = entry.lock_writer();
            // Deleted while we waited, look the path up again
            if *retired {
                continue;
            }
            return f(&*entry, &mut *retired);
        }
    }

    /// Requires the entry's writer lock.
    fn retire(&self, path_id: &str, entry: &PathEntry, retired: &mut bool) {
        *retired = true;
        entry.publish(None);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries
            .get(path_id)
            .is_some_and(|current| std::ptr::eq(Arc::as_ptr(current), entry))
        {
            entries.remove(path_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pot_profile::{PolynomialProfileGenerator, ProfileGenerator};
    use pot_test_helpers::create_shared_rng_from_u64;

    fn profile(generator: &PolynomialProfileGenerator, hop_count: usize) -> Arc<ProfileSnapshot> {
        Arc::new(generator.generate(hop_count, 16).unwrap())
    }

    fn profile_set(seed: u64, hop_count: usize) -> ProfileSet {
        let generator = PolynomialProfileGenerator::new(create_shared_rng_from_u64(seed));
        ProfileSet::new(vec![
            profile(&generator, hop_count),
            profile(&generator, hop_count),
        ])
        .unwrap()
    }

    #[test]
    fn test_profile_set_shape() {
        let generator = PolynomialProfileGenerator::new(create_shared_rng_from_u64(1));

        let single = ProfileSet::new(vec![profile(&generator, 3)]);
        assert!(matches!(
            single,
            Err(LifecycleError::IndexOutOfRange { index: 1, len: 2 })
        ));

        let mixed = ProfileSet::new(vec![profile(&generator, 3), profile(&generator, 4)]);
        assert_eq!(
            mixed.unwrap_err(),
            LifecycleError::HopCountMismatch {
                expected: 3,
                actual: 4
            }
        );
    }

    #[test]
    fn test_with_replaced_keeps_other_slot() {
        let generator = PolynomialProfileGenerator::new(create_shared_rng_from_u64(2));
        let set = profile_set(2, 4);
        let replacement = profile(&generator, 4);

        let next = set.with_replaced(1, replacement.clone()).unwrap();
        assert!(Arc::ptr_eq(&next.profiles()[0], &set.profiles()[0]));
        assert!(Arc::ptr_eq(&next.profiles()[1], &replacement));

        assert!(matches!(
            set.with_replaced(2, replacement),
            Err(LifecycleError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            set.with_replaced(0, profile(&generator, 5)),
            Err(LifecycleError::HopCountMismatch { .. })
        ));
    }

    #[test]
    fn test_put_get_delete() {
        let store = ProfileStore::new();
        assert!(store.is_empty());
        assert!(store.get("rsp-A").is_none());

        let stored = store.put("rsp-A", profile_set(3, 4));
        let loaded = store.get("rsp-A").unwrap();
        assert!(Arc::ptr_eq(&stored, &loaded));
        assert!(store.contains("rsp-A"));
        assert_eq!(store.len(), 1);

        assert!(store.delete("rsp-A"));
        assert!(!store.delete("rsp-A"));
        assert!(store.get("rsp-A").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_replaces_whole_set() {
        let store = ProfileStore::new();
        store.put("rsp-A", profile_set(4, 3));
        store.put("rsp-A", profile_set(5, 6));
        assert_eq!(store.get("rsp-A").unwrap().hop_count(), 6);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_path_ids_sorted() {
        let store = ProfileStore::new();
        for id in ["rsp-C", "rsp-A", "rsp-B"] {
            store.put(id, profile_set(6, 2));
        }
        store.delete("rsp-B");
        assert_eq!(store.path_ids(), vec!["rsp-A", "rsp-C"]);
    }

    #[test]
    fn test_update() {
        let store = ProfileStore::new();
        store.put("rsp-A", profile_set(7, 4));
        let replacement = profile_set(8, 4).profiles()[0].clone();

        let updated = store
            .update("rsp-A", |current| {
                current
                    .ok_or("missing")
                    .and_then(|set| set.with_replaced(1, replacement.clone()).map_err(|_| "bad"))
            })
            .unwrap();
        assert!(Arc::ptr_eq(&updated.profiles()[1], &replacement));
        assert!(Arc::ptr_eq(&store.get("rsp-A").unwrap(), &updated));
    }

    #[test]
    fn test_failed_update_publishes_nothing() {
        let store = ProfileStore::new();
        let before = store.put("rsp-A", profile_set(9, 4));

        let result: Result<_, &str> = store.update("rsp-A", |_| Err("rejected"));
        assert_eq!(result.unwrap_err(), "rejected");
        assert!(Arc::ptr_eq(&store.get("rsp-A").unwrap(), &before));

        let result: Result<_, &str> = store.update("rsp-B", |current| {
            assert!(current.is_none());
            Err("missing")
        });
        assert!(result.is_err());
        assert!(!store.contains("rsp-B"));
        assert_eq!(store.path_ids(), vec!["rsp-A"]);
    }

    #[test]
    fn test_invalid_snapshot_never_reaches_store() {
        let empty = serde_json::json!({
            "algorithm": "polynomial",
            "hop_count": 0,
            "prime": "13",
            "secret": "5",
            "coefficients": [],
            "shares": [],
            "lagrange_coefficients": [],
            "blinding_shares": []
        });
        assert!(serde_json::from_value::<ProfileSnapshot>(empty).is_err());

        let set = profile_set(10, 3);
        let json = serde_json::to_value(set.profiles()[0].as_ref()).unwrap();
        let restored: ProfileSnapshot = serde_json::from_value(json).unwrap();
        let rebuilt = ProfileSet::new(vec![Arc::new(restored), set.profiles()[1].clone()]).unwrap();

        let store = ProfileStore::new();
        store.put("rsp-A", rebuilt);
        assert_eq!(store.get("rsp-A").unwrap().hop_count(), 3);
    }
}
