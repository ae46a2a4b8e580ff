// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Proof-of-Transit profile generation.
//!
//! A profile is one complete set of secret sharing parameters for a service chain:
//! a prime modulus, the secret, the public coefficients, one share per hop and the
//! Lagrange coefficients the verifier needs to recombine the shares.

mod algorithm;
mod errors;
mod generator;
mod registry;
pub mod serde_decimal;
mod snapshot;

pub use algorithm::*;
pub use errors::*;
pub use generator::*;
pub use registry::*;
pub use snapshot::*;

/// Smallest chain that still distributes a secret over more than one hop.
pub const MIN_HOP_COUNT: usize = 2;
