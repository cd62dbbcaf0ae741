use std::env;
use std::net::SocketAddr;

use chrono::FixedOffset;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// Allowed CORS origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    pub api_key: String,
    pub articles_table: String,
    pub sources_table: String,
    /// Row limit of the daily feed query.
    pub fetch_limit: u32,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Offset from UTC that decides where "today" starts and ends.
    pub utc_offset_minutes: i32,
}

impl DashboardConfig {
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "dashboard.utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                ))
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub level: String,
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Defaults, then `config/*.yaml`, then `APP__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        let config_file = match environment.as_str() {
            "production" => "prod",
            _ => "dev",
        };

        let builder = Self::defaults()?
            .add_source(File::with_name("config/default.yaml").required(false))
            .add_source(File::with_name(&format!("config/{}.yaml", config_file)).required(false))
            .add_source(File::with_name("config/local.yaml").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"));

        Self::from_builder(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("level", "info")?
            .set_default("api.bind", "0.0.0.0:8080")?
            .set_default("store.url", "")?
            .set_default("store.api_key", "")?
            .set_default("store.articles_table", "articles")?
            .set_default("store.sources_table", "sources")?
            .set_default("store.fetch_limit", 100_i64)?
            .set_default("store.user_agent", concat!("tech-insights/", env!("CARGO_PKG_VERSION")))?
            .set_default("dashboard.utc_offset_minutes", 9_i64 * 60)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.url.trim().is_empty() {
            return Err(ConfigError::Message("store.url is required".into()));
        }
        if self.store.api_key.trim().is_empty() {
            return Err(ConfigError::Message("store.api_key is required".into()));
        }
        self.dashboard.offset()?;
        Ok(())
    }
}
