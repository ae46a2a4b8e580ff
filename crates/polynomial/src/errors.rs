// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for polynomial operations.

use num_bigint::BigInt;
use thiserror::Error;

/// Errors that can occur during polynomial operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolynomialError {
    /// The modulus cannot define a field (zero, one or negative)
    #[error("Invalid modulus: {message}")]
    InvalidModulus { message: String },

    /// Value has no multiplicative inverse modulo the given modulus
    #[error("{value} is not invertible modulo {modulus}")]
    NotInvertible { value: BigInt, modulus: BigInt },

    /// Index does not address an element of the slice
    #[error("Index {index} out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    /// Two evaluation points coincide
    #[error("Duplicate evaluation point {point}")]
    DuplicatePoint { point: BigInt },

    /// Polynomial without any coefficient
    #[error("Polynomial has no coefficients")]
    EmptyPolynomial,
}
