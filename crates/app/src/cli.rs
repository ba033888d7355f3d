//! Command line definition.

use clap::{Parser, Subcommand};
use tether_domain::AppEnvironment;

/// Tether: sign in and call the account API from the terminal.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about)]
pub struct Cli {
    /// Deployment environment (development, staging, production)
    #[arg(long, global = true, env = "TETHER_ENV")]
    pub env: Option<AppEnvironment>,

    /// Override the environment's API origin
    #[arg(long, global = true, env = "TETHER_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Exchange a user name and password for tokens
    SignIn {
        /// Account user name
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long, env = "TETHER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored tokens and cached profile
    SignOut,

    /// Fetch and print the signed-in user's profile
    Profile,

    /// Show connectivity and session status
    Status,
}
