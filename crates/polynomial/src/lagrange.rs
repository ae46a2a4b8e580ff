// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Lagrange basis coefficients evaluated at zero.

use crate::errors::PolynomialError;
use crate::utils::{mod_inverse, reduce};
use num_bigint::BigInt;
use num_traits::{One, Zero};

fn check_modulus(prime: &BigInt) -> Result<(), PolynomialError> {
    if prime <= &BigInt::one() {
        return Err(PolynomialError::InvalidModulus {
            message: format!("modulus must be greater than one, got {prime}"),
        });
    }
    Ok(())
}

/// Computes the Lagrange basis coefficient of point `index` at `x = 0`.
///
/// `l_index = prod_{j != index} (-x_j) * (x_index - x_j)^{-1} mod prime`
///
/// # Arguments
///
/// * `index` - Position of the point whose coefficient is computed.
/// * `points` - All evaluation points.
/// * `prime` - Field modulus.
///
/// # Errors
///
/// Returns `PolynomialError::IndexOutOfRange` if `index` does not address a point,
/// `PolynomialError::DuplicatePoint` if the point appears twice,
/// `PolynomialError::NotInvertible` if two points collide modulo `prime`, and
/// `PolynomialError::InvalidModulus` if `prime <= 1`.
pub fn lagrange_coefficient_at_zero(
    index: usize,
    points: &[BigInt],
    prime: &BigInt,
) -> Result<BigInt, PolynomialError> {
    check_modulus(prime)?;
    let x_index = points.get(index).ok_or(PolynomialError::IndexOutOfRange {
        index,
        len: points.len(),
    })?;

    let mut acc = BigInt::one();
    for (j, x_j) in points.iter().enumerate() {
        if j == index {
            continue;
        }
        if x_j == x_index {
            return Err(PolynomialError::DuplicatePoint {
                point: x_j.clone(),
            });
        }

        let diff = reduce(&(x_index - x_j), prime);
        let inverse = mod_inverse(&diff, prime).ok_or_else(|| PolynomialError::NotInvertible {
            value: diff.clone(),
            modulus: prime.clone(),
        })?;
        let numerator = reduce(&-x_j, prime);
        acc = reduce(&(acc * numerator * inverse), prime);
    }

    Ok(acc)
}

/// Computes the Lagrange coefficient at zero for every point, in order.
pub fn lagrange_coefficients_at_zero(
    points: &[BigInt],
    prime: &BigInt,
) -> Result<Vec<BigInt>, PolynomialError> {
    (0..points.len())
        .map(|index| lagrange_coefficient_at_zero(index, points, prime))
        .collect()
}

/// Recombines shares into the constant term: `sum_i shares[i] * coefficients[i] mod prime`.
///
/// Extra entries in the longer slice are ignored.
pub fn interpolate_at_zero(shares: &[BigInt], coefficients: &[BigInt], prime: &BigInt) -> BigInt {
    let sum = shares
        .iter()
        .zip(coefficients)
        .fold(BigInt::zero(), |acc, (share, coeff)| acc + share * coeff);
    reduce(&sum, prime)
}
