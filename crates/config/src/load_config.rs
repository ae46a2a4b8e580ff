// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::PotConfig;
use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use path_clean::clean;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "pot.config.yaml";

/// Environment variables with this prefix override file values. Nested keys use `__`,
/// eg. `POT_REFRESH_PERIOD__VALUE=10`.
pub const ENV_PREFIX: &str = "POT_";

pub type FindInParent = fn(&Path, &str) -> Option<PathBuf>;

pub fn find_in_parent(path: &Path, filename: &str) -> Option<PathBuf> {
    path.ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.exists())
}

/// `~/.config/pot` on linux
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_default().join("pot")
}

/// Picks the config file to read.
///
/// An explicit file wins (relative paths resolve against `cwd`). Otherwise the file is
/// searched from `cwd` upward and finally in `default_config_dir`. Returns `None` when
/// no file exists, in which case defaults and environment apply.
pub fn resolve_config_path(
    find_in_parent: FindInParent,
    cwd: &Path,
    default_config_dir: &Path,
    default_filename: &str,
    cli_file: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(cli_file) = cli_file {
        if cli_file.is_absolute() {
            return Some(cli_file.to_path_buf());
        }
        return Some(clean(cwd.join(cli_file)));
    }

    if let Some(found) = find_in_parent(cwd, default_filename) {
        return Some(found);
    }

    let fallback = clean(default_config_dir.join(default_filename));
    fallback.exists().then_some(fallback)
}

/// Loads the configuration from disk and environment and validates it.
pub fn load_config(cli_file: Option<PathBuf>) -> Result<PotConfig> {
    let cwd = env::current_dir()?;
    let path = resolve_config_path(
        find_in_parent,
        &cwd,
        &default_config_dir(),
        DEFAULT_CONFIG_NAME,
        cli_file.as_deref(),
    );
    load_config_from(path.as_deref())
}

/// Merges defaults, the optional YAML file and `POT_` environment variables.
pub fn load_config_from(path: Option<&Path>) -> Result<PotConfig> {
    let mut figment = Figment::from(Serialized::defaults(PotConfig::default()));

    if let Some(path) = path {
        if !path.exists() {
            bail!("Configuration file not found: {}", path.display());
        }
        debug!(path = %path.display(), "Loading configuration file");
        figment = figment.merge(Yaml::file(path));
    }

    let config: PotConfig = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Could not parse configuration")?;

    config
        .validate()
        .context("Invalid proof-of-transit configuration")?;

    Ok(config)
}
