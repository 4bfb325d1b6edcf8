use crate::domain::{ConfidenceLevel, DropoffParameters};
use crate::error::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub defaults: DefaultSettings,
    pub dropoff: DropoffParameters,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DefaultSettings {
    pub confidence_level: ConfidenceLevel,
}

impl Settings {
    /// Load settings from defaults, `config/` files and `RESEARCH_TOOLBOX__*`
    /// environment variables
    pub fn new() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("RESEARCH_TOOLBOX").separator("__"));

        Self::from_sources(builder)
    }

    /// Apply built-in defaults underneath the given sources and deserialize
    pub fn from_sources(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let dropoff = DropoffParameters::default();

        let settings = builder
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("defaults.confidence_level", 95)?
            .set_default(
                "dropoff.seconds_per_single_choice",
                dropoff.seconds_per_single_choice,
            )?
            .set_default(
                "dropoff.seconds_per_multi_choice",
                dropoff.seconds_per_multi_choice,
            )?
            .set_default("dropoff.seconds_per_grid_row", dropoff.seconds_per_grid_row)?
            .set_default("dropoff.seconds_per_open_end", dropoff.seconds_per_open_end)?
            .set_default("dropoff.baseline_completion", dropoff.baseline_completion)?
            .set_default("dropoff.decay_start_minutes", dropoff.decay_start_minutes)?
            .set_default(
                "dropoff.decay_rate_per_minute",
                dropoff.decay_rate_per_minute,
            )?
            .set_default("dropoff.mobile_penalty", dropoff.mobile_penalty)?
            .set_default("dropoff.incentive_divisor", dropoff.incentive_divisor)?
            .set_default("dropoff.incentive_boost_cap", dropoff.incentive_boost_cap)?
            .set_default("dropoff.min_completion", dropoff.min_completion)?
            .set_default("dropoff.max_completion", dropoff.max_completion)?
            .set_default(
                "dropoff.min_invite_to_complete",
                dropoff.min_invite_to_complete,
            )?
            .set_default(
                "dropoff.max_invite_to_complete",
                dropoff.max_invite_to_complete,
            )?
            .set_default("dropoff.min_start_rate", dropoff.min_start_rate)?
            .set_default("dropoff.max_start_rate", dropoff.max_start_rate)?
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}
