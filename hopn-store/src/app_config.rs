use hopn_fare::FarePolicy;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::StoreError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub fares: FarePolicy,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Directory holding the persisted auth session
    pub dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, StoreError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::resolve(Self::builder(&run_mode)?)
    }

    fn resolve(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self, StoreError> {
        Ok(builder.build()?.try_deserialize()?)
    }

    fn builder(run_mode: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        Ok(config::Config::builder()
            .set_default("server.port", 3000)?
            .set_default("session.dir", ".hopn")?
            // Every file is optional so the server starts on defaults alone
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `HOPN__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("HOPN").prefix_separator("__").separator("__")))
    }
}
