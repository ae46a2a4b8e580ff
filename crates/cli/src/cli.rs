// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::telemetry::setup_simple_tracing;
use crate::{generate, print_config, simulate};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use pot_config::{load_config, PotConfig};
use std::path::PathBuf;
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "pot")]
#[command(about = "Generate and rotate polynomial Proof-of-Transit profiles", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `pot -vvv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    pub fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());
        let config = self.load_config()?;
        debug!(?config, "Config loaded");

        match self.command {
            Commands::Generate {
                hops,
                bit_width,
                seed,
            } => generate::execute(&config, hops, bit_width, seed)?,
            Commands::Simulate {
                path,
                hops,
                renewals,
                seed,
            } => simulate::execute(&config, &path, hops, renewals, seed)?,
            Commands::PrintConfig => print_config::execute(&config)?,
        }

        Ok(())
    }

    pub fn load_config(&self) -> Result<PotConfig> {
        load_config(self.config.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a single profile and print it as JSON
    Generate {
        /// Number of hops in the chain, the last one being the verifier
        #[arg(long)]
        hops: usize,

        /// Bit width of the random coefficients. Defaults to the configured value
        #[arg(long)]
        bit_width: Option<u32>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run init and renewals for one path and print the verifier parameters
    Simulate {
        /// Path id
        #[arg(long)]
        path: String,

        /// Number of hops in the chain
        #[arg(long)]
        hops: usize,

        /// Number of renewals after init
        #[arg(long, default_value_t = 1)]
        renewals: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the resolved configuration as YAML
    PrintConfig,
}
