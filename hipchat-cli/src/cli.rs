use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "hipchat",
    version,
    about = "Send HipChat room notifications for triggered alerts"
)]
pub struct Args {
    /// Configuration file (TOML, flat keys)
    #[arg(short, long, global = true, env = "HIPCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Room token, overrides `api_token` from the config file
    #[arg(long, global = true, env = "HIPCHAT_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Room ID or name, overrides `room` from the config file
    #[arg(long, global = true, env = "HIPCHAT_ROOM")]
    pub room: Option<String>,

    /// API base URL for self hosted HipChat
    #[arg(long, global = true, env = "HIPCHAT_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Fill unset optional fields with their declared defaults
    #[arg(long, global = true)]
    pub fill_defaults: bool,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Notify the configured room about a triggered alert
    Send {
        /// Title of the stream the alert fired on
        #[arg(long)]
        stream: String,

        /// Description of the check result
        #[arg(long)]
        description: String,
    },

    /// Validate the configuration
    Check,

    /// Print the configuration with the token masked
    Attributes,

    /// Print the configuration fields as JSON
    Fields,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
