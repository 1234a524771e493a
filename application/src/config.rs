//! [`Config`]-related definitions.

use std::path::PathBuf;

use client::infra::{gateway::http, storage::sled};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;
use url::Url;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Backend API configuration.
    #[serde(default)]
    pub api: Api,

    /// Session storage configuration.
    #[serde(default)]
    pub storage: Storage,

    /// Client configuration.
    #[serde(default)]
    pub client: Client,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Backend API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL every API path is relative to.
    #[default(Url::parse("http://127.0.0.1:8000/api/").expect("valid URL"))]
    pub base_url: Url,

    /// Scheme of the `Authorization` header.
    #[default("Token".to_owned())]
    pub auth_scheme: String,
}

impl From<Api> for http::Config {
    fn from(value: Api) -> Self {
        let Api {
            base_url,
            auth_scheme,
        } = value;
        Self {
            base_url,
            auth_scheme,
        }
    }
}

/// Session storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Directory of the session database.
    #[default(PathBuf::from(".movies/session"))]
    pub path: PathBuf,

    /// Indicator whether the session is dropped on exit.
    pub temporary: bool,
}

impl From<Storage> for sled::Config {
    fn from(value: Storage) -> Self {
        let Storage { path, temporary } = value;
        Self { path, temporary }
    }
}

/// Client configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Client {
    /// Maximum number of movies picked for the `for-you` command.
    #[default(10)]
    pub for_you_limit: usize,
}

impl From<Client> for client::Config {
    fn from(value: Client) -> Self {
        let Client { for_you_limit } = value;
        Self { for_you_limit }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    Info,

    /// Designates hazardous situations.
    #[default]
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
