use std::collections::BTreeMap;
use std::env;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use shadesync_api::{BlindPayload, ReasonCode};
use shadesync_engine::ReasonCatalog;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    /// Blinds configured before the first message arrives
    #[serde(default)]
    pub blinds: Vec<BlindPayload>,
    /// Reason description overrides, keyed by code
    #[serde(default)]
    pub reasons: BTreeMap<ReasonCode, String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Self::builder()?
            .add_source(File::with_name("configs/default").required(false))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Settings from a single TOML document, defaults filled in
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn reason_catalog(&self) -> ReasonCatalog {
        ReasonCatalog::with_overrides(self.reasons.clone())
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder().set_default("logger.level", "info")
    }
}
