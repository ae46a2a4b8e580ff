// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use pot_config::PotConfig;

pub fn execute(config: &PotConfig) -> Result<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}
