// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Random coefficient generation.

use num_bigint::{BigInt, RandBigInt};
use num_traits::One;
use rand::Rng;

/// Bit width used when the caller does not ask for another one.
pub const DEFAULT_BIT_WIDTH: u32 = 60;

/// Hard upper bound on the coefficient bit width.
pub const MAX_BIT_WIDTH: u32 = 64;

/// Clamps a requested bit width into `1..=MAX_BIT_WIDTH`.
pub fn clamp_bit_width(bit_width: u32) -> u32 {
    bit_width.clamp(1, MAX_BIT_WIDTH)
}

/// Draws `n` coefficients uniformly from `[1, 2^bit_width]`.
///
/// # Arguments
///
/// * `n` - Number of coefficients (the hop count when building a profile).
/// * `bit_width` - Requested width, clamped with [`clamp_bit_width`].
/// * `rng` - Source of randomness.
pub fn random_coefficients<R: Rng + ?Sized>(n: usize, bit_width: u32, rng: &mut R) -> Vec<BigInt> {
    let low = BigInt::one();
    // gen_bigint_range excludes the upper bound
    let high = (BigInt::one() << clamp_bit_width(bit_width)) + 1;
    (0..n).map(|_| rng.gen_bigint_range(&low, &high)).collect()
}
