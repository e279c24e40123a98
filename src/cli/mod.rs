pub mod check;
pub mod common;
pub mod hash_password;
pub mod json_output;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "authchain",
    version,
    about = "Run credentials through a conditional authentication chain"
)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Chain config file (default: $AUTHCHAIN_CONFIG, else ~/.authchain/chain.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate a principal through the configured chain
    Check {
        /// Principal (username) to authenticate
        principal: String,
        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
        /// Record where the attempt originates (carried as request details)
        #[arg(long)]
        origin: Option<String>,
        /// Show what each chain entry did
        #[arg(long)]
        trace: bool,
    },

    /// Validate the chain config and list its entries
    Validate,

    /// Hash a password for the chain config
    HashPassword {
        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },
}
