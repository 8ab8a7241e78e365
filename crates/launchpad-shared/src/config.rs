//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::AppError;

use crate::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_LOGIN_ATTEMPTS_PER_MINUTE, DEFAULT_PENDING_APPLICATION_TTL,
    DEFAULT_PURGE_INTERVAL, DEFAULT_SESSION_TTL,
};

pub const DEV_JWT_SECRET: &str = "launchpad-dev-secret-change-me";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub applications: ApplicationSettings,
    #[serde(default)]
    pub seed: SeedSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub log_format: String,
    /// Allowed browser origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Seconds between sweeps of expired sessions and parked applications
    pub purge_interval: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    /// Seconds
    pub access_token_expiry: i64,
    /// Seconds
    pub session_ttl: i64,
    pub login_attempts_per_minute: u32,
}

impl AuthSettings {
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    /// Seconds a parked application waits for its owner to log in or register
    pub pending_ttl: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedSettings {
    #[serde(default)]
    pub admins: Vec<SeedAdmin>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .set_default("app.env", env.clone())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("LAUNCHPAD")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("app.cors_origins")
                    .try_parsing(true),
            )
            .build()?;
        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from defaults overlaid with an inline TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Reject settings that are unsafe or meaningless at runtime
    pub fn validate(&self) -> Result<(), AppError> {
        if self.app.env == "production" && self.auth.uses_dev_secret() {
            return Err(AppError::InvalidSetting {
                key: "auth.jwt_secret",
                reason: "the development secret cannot be used in production".to_string(),
            });
        }
        if self.auth.access_token_expiry <= 0 || self.auth.session_ttl <= 0 {
            return Err(AppError::InvalidSetting {
                key: "auth",
                reason: "token and session lifetimes must be positive".to_string(),
            });
        }
        if self.applications.pending_ttl <= 0 {
            return Err(AppError::InvalidSetting {
                key: "applications.pending_ttl",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "launchpad-server")?
            .set_default("app.log_format", "json")?
            .set_default("app.purge_interval", DEFAULT_PURGE_INTERVAL)?
            .set_default("auth.jwt_secret", DEV_JWT_SECRET)?
            .set_default("auth.access_token_expiry", DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("auth.session_ttl", DEFAULT_SESSION_TTL)?
            .set_default("auth.login_attempts_per_minute", i64::from(DEFAULT_LOGIN_ATTEMPTS_PER_MINUTE))?
            .set_default("applications.pending_ttl", DEFAULT_PENDING_APPLICATION_TTL)
    }
}
