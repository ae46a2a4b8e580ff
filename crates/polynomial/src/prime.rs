// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Prime search for profile moduli.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Miller-Rabin bases. Testing against the first thirteen primes is deterministic for
/// every `n < 3.3 * 10^24`, well above anything a 64 bit coefficient bound produces.
const WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Checks whether `n` is prime.
///
/// Trial division by the primes below 100 settles small and most composite inputs,
/// the rest go through Miller-Rabin with fixed bases.
pub fn is_probable_prime(n: &BigInt) -> bool {
    let Some(n) = n.to_biguint() else {
        return false;
    };
    if n < BigUint::from(2u8) {
        return false;
    }

    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if n == p {
            return true;
        }
        if (&n % &p).is_zero() {
            return false;
        }
    }

    miller_rabin(&n)
}

fn miller_rabin(n: &BigUint) -> bool {
    let one = BigUint::one();
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for a in WITNESSES {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

/// Returns the least prime greater than or equal to `x`.
///
/// Inputs at or below 2 (including negatives) yield 2.
pub fn smallest_prime_at_least(x: &BigInt) -> BigInt {
    let two = BigInt::from(2);
    if x <= &two {
        return two;
    }

    let mut candidate = x.clone();
    if candidate.is_even() {
        candidate += 1;
    }
    while !is_probable_prime(&candidate) {
        candidate += 2;
    }
    candidate
}
