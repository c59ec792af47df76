//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

/// VoiceAssist - hands-free voice command assistant
#[derive(Parser, Debug)]
#[command(name = "voice-assist")]
#[command(version)]
#[command(about = "Hands-free voice command assistant with wake-word gating")]
#[command(long_about = None)]
pub struct Cli {
    /// Recognition locale (e.g. en-US, en-GB)
    #[arg(short, long, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Speech output backend
    #[arg(short, long, value_name = "VOICE")]
    pub voice: Option<VoiceArg>,

    /// Skip the spoken welcome message
    #[arg(long)]
    pub no_welcome: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Run one utterance through the classification pipeline and print
    /// the result
    Classify {
        /// The utterance, e.g. "hey assistant call 911"
        #[arg(required = true, num_args = 1..)]
        utterance: Vec<String>,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create the config file with defaults
    Init,
    /// Set a config value
    Set { key: String, value: String },
    /// Get a config value
    Get { key: String },
    /// List all config values
    List,
    /// Show the config file path
    Path,
}

/// Speech output backends selectable from the CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceArg {
    Console,
    Espeak,
}

impl VoiceArg {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Espeak => "espeak",
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "locale",
    "voice",
    "restart_delay_ms",
    "retry_delay_ms",
    "device_name",
];

/// Check whether a key is a valid config key
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
