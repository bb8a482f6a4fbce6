//! Handles settings for the application.
//!
//! Values are layered: defaults, then the optional TOML file
//! (`config/splitpot.toml` unless `--config` says otherwise), then `SPLITPOT_*`
//! environment variables, then command line flags.
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/splitpot";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the group snapshot (JSON) to summarize.
    pub snapshot: Option<String>,
    pub format: OutputFormat,
    /// Only show this member's balance and transfers.
    pub member: Option<String>,
    /// Log level for the `tracing` subscriber.
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot: None,
            format: OutputFormat::Text,
            member: None,
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "splitpot")]
#[command(about = "Compute balances and settle-up transfers for a group snapshot")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Group snapshot to read (JSON).
    #[arg(long, env = "SPLITPOT_SNAPSHOT")]
    snapshot: Option<String>,
    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Member uid to focus on.
    #[arg(long)]
    member: Option<String>,
    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    level: Option<String>,
}

pub fn load() -> Result<Settings> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("SPLITPOT"))
        .build()?
        .try_deserialize()?;

    if let Some(snapshot) = args.snapshot {
        settings.snapshot = Some(snapshot);
    }
    if let Some(format) = args.format {
        settings.format = format;
    }
    if let Some(member) = args.member {
        settings.member = Some(member);
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok(settings)
}
