// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Polynomial Library
//!
//! Big integer polynomial and modular arithmetic used to build Proof-of-Transit
//! profiles: polynomial secret sharing over a prime field where every hop of a
//! service chain holds one share and the verifier recombines them.
//!
//! ## Features
//!
//! - Uses `num-bigint` for every value, so coefficients raised to a power never overflow.
//! - Random coefficient generation with a bounded bit width.
//! - Prime search (`smallest_prime_at_least`) backed by Miller-Rabin.
//! - Modular evaluation that keeps the constant term (the secret) out of the sum.
//! - Lagrange basis coefficients at zero with extended Euclidean inverses.
//!
//! ## Mathematical Background
//!
//! A polynomial `P(x) = a_0 + a_1 x + ... + a_{n-1} x^{n-1}` over `Z_p` is evaluated at
//! `n` distinct points `x_i`. Given the shares `P(x_i)` and the constants
//! `l_i = prod_{j != i} (-x_j) / (x_i - x_j)`, the secret is recovered as
//! `a_0 = sum_i P(x_i) * l_i mod p`.

mod errors;
pub mod lagrange;
pub mod polynomial;
pub mod prime;
pub mod random;
pub mod utils;

pub use errors::PolynomialError;
pub use lagrange::*;
pub use polynomial::Polynomial;
pub use prime::*;
pub use random::*;
pub use utils::*;
