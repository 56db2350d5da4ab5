use config::{Config, ConfigError};
use serde::Deserialize;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "group-config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub database: Option<DatabaseConfig>,
    pub server: Option<ServerConfig>,
    pub sys: Option<SysConfig>,
}

impl AppConfig {
    /// Loads `file` (extension optional) and overlays `APP__SECTION__KEY` env vars.
    pub fn new(file: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(file).required(true))
            .add_source(config::Environment::with_prefix("APP").prefix_separator("__").separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize::<AppConfig>()
    }

    pub fn get_database(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_default()
    }
    pub fn get_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
    pub fn get_sys(&self) -> SysConfig {
        self.sys.clone().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Mongo,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_url")]
    pub url: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[serde(default)]
    pub store: StoreKind,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: default_db_url(), db_name: default_db_name(), store: StoreKind::default() }
    }
}

fn default_db_url() -> String {
    "mongodb://127.0.0.1:27017".to_string()
}
fn default_db_name() -> String {
    "group_api".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SysConfig {
    // off / error / warn / info / debug / trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SysConfig {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    4741
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
