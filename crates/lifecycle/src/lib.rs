// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Per path profile sets and their rotation.
//!
//! Every rendered path owns two profiles. The dataplane uses one while the other
//! is regenerated, so a renewal never touches the profile currently in use.

mod error;
mod manager;
mod params;
mod store;

pub use error::*;
pub use manager::*;
pub use params::*;
pub use pot_config::NUM_PROFILES;
pub use store::*;
