// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{PotAlgorithm, ProfileError, ProfileParts, ProfileSnapshot, MIN_HOP_COUNT};
use num_bigint::BigInt;
use pot_polynomial::{lagrange_coefficients_at_zero, smallest_prime_at_least, Polynomial};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

pub type SharedRng = Arc<Mutex<ChaCha20Rng>>;

/// Produces self-contained profiles for one verification algorithm.
pub trait ProfileGenerator: Send + Sync {
    /// Algorithm implemented by this generator.
    fn algorithm(&self) -> PotAlgorithm;

    /// Generates one profile for a chain of `hop_count` hops.
    fn generate(&self, hop_count: usize, bit_width: u32)
        -> Result<ProfileSnapshot, ProfileError>;
}

/// Polynomial secret sharing generator.
#[derive(Clone)]
pub struct PolynomialProfileGenerator {
    rng: SharedRng,
}

impl PolynomialProfileGenerator {
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }

    /// Generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(Arc::new(Mutex::new(ChaCha20Rng::from_entropy())))
    }
}

impl ProfileGenerator for PolynomialProfileGenerator {
    fn algorithm(&self) -> PotAlgorithm {
        PotAlgorithm::Polynomial
    }

    fn generate(
        &self,
        hop_count: usize,
        bit_width: u32,
    ) -> Result<ProfileSnapshot, ProfileError> {
        // Only the child seed is drawn under the shared lock. A panic while
        // holding it leaves the rng usable
        let seed: [u8; 32] = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen();
        let mut rng = ChaCha20Rng::from_seed(seed);
        let draw = draw_polynomials(hop_count, bit_width, &mut rng)?;
        build_profile(draw)
    }
}

/// Generates one polynomial profile from the given randomness source.
pub fn generate_polynomial_profile<R: Rng + ?Sized>(
    hop_count: usize,
    bit_width: u32,
    rng: &mut R,
) -> Result<ProfileSnapshot, ProfileError> {
    build_profile(draw_polynomials(hop_count, bit_width, rng)?)
}

/// Random material for one profile: the secret polynomial (A), the blinding
/// polynomial (B) and the shuffled evaluation points.
struct PolynomialDraw {
    secret_poly: Polynomial,
    blinding_poly: Polynomial,
    points: Vec<BigInt>,
}

fn draw_polynomials<R: Rng + ?Sized>(
    hop_count: usize,
    bit_width: u32,
    rng: &mut R,
) -> Result<PolynomialDraw, ProfileError> {
    if hop_count < MIN_HOP_COUNT {
        return Err(ProfileError::InvalidHopCount { hop_count });
    }

    let secret_poly = Polynomial::random(hop_count, bit_width, rng)?;
    let blinding_poly = Polynomial::random(hop_count, bit_width, rng)?;

    // Even points 2, 4, .., 2n in random order, so a hop's point says nothing
    // about its position in the chain.
    let mut points: Vec<BigInt> = (1..=hop_count).map(|i| BigInt::from(i * 2)).collect();
    points.shuffle(rng);

    Ok(PolynomialDraw {
        secret_poly,
        blinding_poly,
        points,
    })
}

fn build_profile(draw: PolynomialDraw) -> Result<ProfileSnapshot, ProfileError> {
    let PolynomialDraw {
        secret_poly,
        blinding_poly,
        points,
    } = draw;
    let hop_count = points.len();

    // The prime must exceed every coefficient, even a prime one, and every
    // evaluation point, so all points stay distinct and invertible.
    let largest_point = BigInt::from(hop_count * 2);
    let floor = [
        secret_poly.max_coefficient(),
        blinding_poly.max_coefficient(),
        &largest_point,
    ]
    .into_iter()
    .max()
    .cloned()
    .unwrap_or(largest_point.clone());
    let prime = smallest_prime_at_least(&(floor + 1));

    let shares = points
        .iter()
        .map(|x| secret_poly.evaluate_mod(x, &prime))
        .collect();
    let lagrange_coefficients = lagrange_coefficients_at_zero(&points, &prime)?;
    let blinding_shares = points
        .iter()
        .map(|x| blinding_poly.evaluate_mod(x, &prime))
        .collect();

    debug!(hop_count, prime_bits = prime.bits(), "Generated polynomial profile");

    ProfileSnapshot::from_parts(ProfileParts {
        algorithm: PotAlgorithm::Polynomial,
        secret: secret_poly.constant_term().clone(),
        coefficients: secret_poly.non_constant_coefficients().to_vec(),
        prime,
        shares,
        lagrange_coefficients,
        blinding_shares,
    })
}
