// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Modular helpers shared by the polynomial, prime and Lagrange modules.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Canonical residue of `x` in `[0, modulus)`, also for negative `x`.
pub fn reduce(x: &BigInt, modulus: &BigInt) -> BigInt {
    let r = x % modulus;
    if r.is_negative() {
        r + modulus
    } else {
        r
    }
}

/// Computes the multiplicative inverse of `a` modulo `modulus`.
///
/// Runs the extended Euclidean algorithm on `(a mod modulus, modulus)` and
/// tracks only the Bezout coefficient of `a`.
///
/// # Returns
///
/// `Some(inverse)` in `[0, modulus)` when `gcd(a, modulus) == 1`, `None` otherwise
/// (including `a ≡ 0` and moduli below 2).
pub fn mod_inverse(a: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    if modulus <= &BigInt::one() {
        return None;
    }

    let (mut old_r, mut r) = (reduce(a, modulus), modulus.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if old_r.is_one() {
        Some(reduce(&old_s, modulus))
    } else {
        None
    }
}

/// Evaluates every term of a polynomial except the constant one.
///
/// Computes `sum_{k=1}^{len-1} coefficients[k] * x^k mod prime` with Horner's
/// method. `coefficients[0]` is the shared secret and is added by the caller;
/// keeping it out of this sum is what turns an evaluation into a share.
///
/// # Arguments
///
/// * `x` - Evaluation point.
/// * `coefficients` - Coefficients in ascending order of degree.
/// * `prime` - Field modulus.
///
/// # Returns
///
/// The sum in `[0, prime)`. Slices with fewer than two coefficients yield zero.
pub fn evaluate_non_constant_term(x: &BigInt, coefficients: &[BigInt], prime: &BigInt) -> BigInt {
    let x = reduce(x, prime);
    coefficients
        .iter()
        .skip(1)
        .rev()
        .fold(BigInt::zero(), |acc, coeff| reduce(&((acc + coeff) * &x), prime))
}

/// Returns the largest value of a slice, or `None` when it is empty.
pub fn max_coefficient(coefficients: &[BigInt]) -> Option<&BigInt> {
    coefficients.iter().max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_reduce_is_canonical() {
        let p = BigInt::from(13);
        let cases = [(-27, 12), (-13, 0), (-1, 12), (0, 0), (5, 5), (13, 0), (40, 1)];
        for (x, expected) in cases {
            assert_eq!(reduce(&BigInt::from(x), &p), BigInt::from(expected), "x = {x}");
        }

        for x in -60..=60 {
            let r = reduce(&BigInt::from(x), &p);
            assert!(!r.is_negative() && r < p, "{x} reduced to {r}");
        }
    }

    #[test]
    fn test_mod_inverse() {
        let modulus = BigInt::from(7);
        assert_eq!(mod_inverse(&BigInt::from(3), &modulus), Some(BigInt::from(5)));
        assert_eq!(mod_inverse(&BigInt::from(1), &modulus), Some(BigInt::from(1)));
        // -2 ≡ 5 and 5 * 3 = 15 ≡ 1
        assert_eq!(mod_inverse(&BigInt::from(-2), &modulus), Some(BigInt::from(3)));

        for a in 1..7 {
            let inv = mod_inverse(&BigInt::from(a), &modulus).unwrap();
            assert_eq!(reduce(&(BigInt::from(a) * inv), &modulus), BigInt::from(1));
        }
    }

    #[test]
    fn test_mod_inverse_missing() {
        assert_eq!(mod_inverse(&BigInt::from(0), &BigInt::from(7)), None);
        assert_eq!(mod_inverse(&BigInt::from(14), &BigInt::from(7)), None);
        assert_eq!(mod_inverse(&BigInt::from(4), &BigInt::from(8)), None);
        assert_eq!(mod_inverse(&BigInt::from(3), &BigInt::from(1)), None);
        assert_eq!(mod_inverse(&BigInt::from(3), &BigInt::from(-7)), None);
    }

    #[test]
    fn test_mod_inverse_large_prime() {
        // 2^61 - 1 is a Mersenne prime
        let prime = (BigInt::from(1) << 61u32) - 1;
        let a = BigInt::from(123_456_789_012_345u64);
        let inv = mod_inverse(&a, &prime).unwrap();
        assert_eq!(reduce(&(a * inv), &prime), BigInt::from(1));
    }

    #[test]
    fn test_evaluate_non_constant_term() {
        // 100 + 2x + 3x^2 at x = 4 without the constant: 8 + 48 = 56
        let coeffs = vec![BigInt::from(100), BigInt::from(2), BigInt::from(3)];
        let prime = BigInt::from(1009);
        assert_eq!(
            evaluate_non_constant_term(&BigInt::from(4), &coeffs, &prime),
            BigInt::from(56)
        );

        // Same polynomial reduced modulo 13: 56 mod 13 = 4
        assert_eq!(
            evaluate_non_constant_term(&BigInt::from(4), &coeffs, &BigInt::from(13)),
            BigInt::from(4)
        );
    }

    #[test]
    fn test_evaluate_non_constant_term_degenerate() {
        let prime = BigInt::from(13);
        assert_eq!(
            evaluate_non_constant_term(&BigInt::from(4), &[BigInt::from(9)], &prime),
            BigInt::from(0)
        );
        assert_eq!(
            evaluate_non_constant_term(&BigInt::from(4), &[], &prime),
            BigInt::from(0)
        );
    }

    #[test]
    fn test_max_coefficient() {
        let coeffs = vec![BigInt::from(4), BigInt::from(17), BigInt::from(2)];
        assert_eq!(max_coefficient(&coeffs), Some(&BigInt::from(17)));
        assert_eq!(max_coefficient(&[]), None);
    }

    proptest::proptest! {
        #[test]
        fn prop_mod_inverse_mersenne(a in 1u64..(1u64 << 61) - 1) {
            let prime = (BigInt::from(1) << 61u32) - 1;
            let a = BigInt::from(a);
            let inv = mod_inverse(&a, &prime).unwrap();
            proptest::prop_assert!(inv < prime);
            proptest::prop_assert_eq!(reduce(&(a * inv), &prime), BigInt::one());
        }
    }
}
