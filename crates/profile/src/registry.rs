// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{PolynomialProfileGenerator, PotAlgorithm, ProfileError, ProfileGenerator, SharedRng};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Maps each algorithm to the generator that implements it.
///
/// Built by the caller and handed to whoever needs a generator; there is no
/// process wide registry.
#[derive(Clone, Default)]
pub struct AlgorithmRegistry {
    generators: HashMap<PotAlgorithm, Arc<dyn ProfileGenerator>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in algorithm sharing the given rng.
    pub fn with_defaults(rng: SharedRng) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PolynomialProfileGenerator::new(rng)));
        registry
    }

    /// Registers a generator under its own algorithm, returning the one it replaced.
    pub fn register(
        &mut self,
        generator: Arc<dyn ProfileGenerator>,
    ) -> Option<Arc<dyn ProfileGenerator>> {
        let algorithm = generator.algorithm();
        trace!(%algorithm, "Registering profile generator");
        self.generators.insert(algorithm, generator)
    }

    pub fn get(&self, algorithm: PotAlgorithm) -> Result<Arc<dyn ProfileGenerator>, ProfileError> {
        self.generators
            .get(&algorithm)
            .cloned()
            .ok_or(ProfileError::UnknownAlgorithm(algorithm))
    }

    pub fn algorithms(&self) -> Vec<PotAlgorithm> {
        let mut algorithms: Vec<_> = self.generators.keys().copied().collect();
        algorithms.sort_by_key(|a| a.as_str());
        algorithms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::sync::Mutex;

    fn rng() -> SharedRng {
        Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(42)))
    }

    #[test]
    fn test_empty_registry() {
        let registry = AlgorithmRegistry::new();
        assert!(registry.algorithms().is_empty());
        assert!(matches!(
            registry.get(PotAlgorithm::Polynomial),
            Err(ProfileError::UnknownAlgorithm(PotAlgorithm::Polynomial))
        ));
    }

    #[test]
    fn test_defaults_resolve_polynomial() {
        let registry = AlgorithmRegistry::with_defaults(rng());
        assert_eq!(registry.algorithms(), vec![PotAlgorithm::Polynomial]);
        let generator = registry.get(PotAlgorithm::Polynomial).unwrap();
        assert_eq!(generator.algorithm(), PotAlgorithm::Polynomial);
        assert!(generator.generate(3, 60).unwrap().verify_reconstruction());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = AlgorithmRegistry::with_defaults(rng());
        let replaced = registry.register(Arc::new(PolynomialProfileGenerator::new(rng())));
        assert!(replaced.is_some());
        assert_eq!(registry.algorithms().len(), 1);
    }
}
