use crate::config::app_config::{AppConfig, EngineKind};
use crate::domain::model::RawInput;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "interest-calc")]
#[command(about = "Simple and compound interest calculator", version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the calculation engine from config
    #[arg(long, global = true, value_enum)]
    pub engine: Option<EngineKind>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate simple and compound interest
    Calculate {
        /// Principal amount
        #[arg(short, long, allow_hyphen_values = true)]
        principal: Option<String>,

        /// Annual interest rate in percent
        #[arg(short, long, allow_hyphen_values = true)]
        rate: Option<String>,

        /// Time in years
        #[arg(short, long, allow_hyphen_values = true)]
        time: Option<String>,

        /// Print the rounded result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the spreadsheet has the required worksheets
    Verify,
    /// Report whether the configured engine is usable
    Health,
}

impl Command {
    /// Raw values as typed; validation happens later so every field is reported.
    pub fn raw_input(&self) -> Option<RawInput> {
        match self {
            Command::Calculate {
                principal,
                rate,
                time,
                ..
            } => Some(RawInput::new(principal.clone(), rate.clone(), time.clone())),
            _ => None,
        }
    }
}

impl Cli {
    /// File (or defaults), then environment, then command-line overrides.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        config.apply_env_overrides();
        if let Some(kind) = self.engine {
            config.engine.kind = kind;
        }
        Ok(config)
    }
}
