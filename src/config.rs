//! Layered service settings.
//!
//! Sources, lowest priority first: built-in defaults, `trivia.toml` (or the
//! file passed on the command line), then `TRIVIA_*` environment variables
//! with `__` between nested keys, e.g. `TRIVIA_SERVER__PORT=8080`.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_bool_from_anything, deserialize_number_from_string,
};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub span_events: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite:trivia.db")?
            .set_default("database.max_connections", 5)?
            .set_default("database.run_migrations", true)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .set_default("log.span_events", false)?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("trivia").required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix("TRIVIA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
