// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod load_config;
mod pot_config;
mod refresh;

pub use load_config::{load_config, DEFAULT_CONFIG_NAME};
pub use pot_config::*;
pub use refresh::*;
