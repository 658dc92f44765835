//! CLI argument definitions using clap
//!
//! Commands:
//! - wardstone init --config <path>
//! - wardstone console --config <path>
//! - wardstone check --config <path> <state>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wardstone - A server-authoritative block protection whitelist engine
#[derive(Parser, Debug)]
#[command(name = "wardstone")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a default configuration document
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./wardstone.json")]
        config: PathBuf,
    },

    /// Run an interactive authoritative session
    Console {
        /// Path to configuration file
        #[arg(long, default_value = "./wardstone.json")]
        config: PathBuf,
    },

    /// Test a concrete block state against the whitelist
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./wardstone.json")]
        config: PathBuf,

        /// State query, e.g. minecraft:log[variant=oak,axis=y]
        state: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
