// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt, EnvFilter};

/// Deterministic rng shared between generators, matching `pot_profile::SharedRng`.
pub fn create_shared_rng_from_u64(value: u64) -> Arc<Mutex<ChaCha20Rng>> {
    Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(value)))
}

/// Routes tracing output of the current thread into the test harness.
///
/// Keep the returned guard alive for as long as output should be captured.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_test_tracing() -> DefaultGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter).with_test_writer().finish();
    tracing::subscriber::set_default(subscriber)
}

/// Path ids `"{prefix}-0"`, `"{prefix}-1"`, ...
pub fn path_ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}-{i}")).collect()
}
