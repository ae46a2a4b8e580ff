// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Polynomial over a prime field with the secret stored as the constant term.

use crate::errors::PolynomialError;
use crate::random::random_coefficients;
use crate::utils::{evaluate_non_constant_term, max_coefficient, reduce};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polynomial represented by its coefficients in ascending order of degree.
///
/// The polynomial is `a_0 + a_1 * x + ... + a_{n-1} * x^{n-1}`. When used for
/// secret sharing `a_0` is the secret and the remaining coefficients are the
/// public part handed to the verifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<BigInt>", into = "Vec<BigInt>")
)]
pub struct Polynomial {
    /// Coefficients in ascending order (constant term first).
    pub(crate) coefficients: Vec<BigInt>,
}

impl TryFrom<Vec<BigInt>> for Polynomial {
    type Error = PolynomialError;

    fn try_from(coefficients: Vec<BigInt>) -> Result<Self, Self::Error> {
        Self::new(coefficients)
    }
}

impl From<Polynomial> for Vec<BigInt> {
    fn from(polynomial: Polynomial) -> Self {
        polynomial.coefficients
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (degree, coeff) in self.coefficients.iter().enumerate().rev() {
            if coeff.is_zero() {
                continue;
            }

            if !first {
                if coeff > &BigInt::zero() {
                    write!(f, " + ")?;
                } else {
                    write!(f, " - ")?;
                }
            } else if coeff < &BigInt::zero() {
                write!(f, "-")?;
            }
            first = false;

            let abs_coeff = if coeff < &BigInt::zero() {
                -coeff
            } else {
                coeff.clone()
            };

            if degree == 0 || !abs_coeff.is_one() {
                write!(f, "{abs_coeff}")?;
            }

            if degree > 0 {
                write!(f, "x")?;
                if degree > 1 {
                    write!(f, "^{degree}")?;
                }
            }
        }

        if first {
            write!(f, "0")?;
        }

        Ok(())
    }
}

impl Polynomial {
    /// Creates a new polynomial from coefficients in ascending order of degree.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::EmptyPolynomial` when `coefficients` is empty.
    pub fn new(coefficients: Vec<BigInt>) -> Result<Self, PolynomialError> {
        if coefficients.is_empty() {
            return Err(PolynomialError::EmptyPolynomial);
        }
        Ok(Self { coefficients })
    }

    /// Creates a polynomial with `len` random coefficients drawn from `[1, 2^bit_width]`.
    ///
    /// `len` is the number of coefficients, so the degree is `len - 1`.
    pub fn random<R: Rng + ?Sized>(
        len: usize,
        bit_width: u32,
        rng: &mut R,
    ) -> Result<Self, PolynomialError> {
        Self::new(random_coefficients(len, bit_width, rng))
    }

    /// Returns the coefficients of the polynomial.
    pub fn coefficients(&self) -> &[BigInt] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Returns the constant term.
    pub fn constant_term(&self) -> &BigInt {
        &self.coefficients[0]
    }

    /// Returns every coefficient except the constant term.
    pub fn non_constant_coefficients(&self) -> &[BigInt] {
        &self.coefficients[1..]
    }

    /// Returns the largest coefficient.
    pub fn max_coefficient(&self) -> &BigInt {
        // new() guarantees at least one coefficient
        max_coefficient(&self.coefficients).unwrap_or(&self.coefficients[0])
    }

    /// Evaluates all terms but the constant one at `x`, modulo `prime`.
    pub fn evaluate_non_constant_mod(&self, x: &BigInt, prime: &BigInt) -> BigInt {
        evaluate_non_constant_term(x, &self.coefficients, prime)
    }

    /// Evaluates the polynomial at `x`, modulo `prime`.
    pub fn evaluate_mod(&self, x: &BigInt, prime: &BigInt) -> BigInt {
        reduce(
            &(self.evaluate_non_constant_mod(x, prime) + self.constant_term()),
            prime,
        )
    }

    /// Evaluates the polynomial over the integers using Horner's method.
    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        self.coefficients
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, coeff| acc * x + coeff)
    }
}
