//! Configuration management for contactbook.
//!
//! Settings for the service and the client, layered with figment: built-in
//! defaults, then a TOML file, then `CONTACTBOOK_` environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "contactbook";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "contacts.db";

/// Prefix of environment variables that override configuration.
const ENV_PREFIX: &str = "CONTACTBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CONTACTBOOK_`, sections split on `__`)
/// 2. TOML config file at `~/.config/contactbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Seed configuration.
    pub seed: SeedConfig,
    /// Client configuration.
    pub client: ClientConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Origins allowed to call the API from a browser. `*` allows any.
    pub cors_allowed_origins: Vec<String>,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/contactbook/contacts.db`
    pub database_path: Option<PathBuf>,
}

/// Seed-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Insert the sample contacts on `serve` when the store is empty.
    pub enabled: bool,
}

/// Client-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL of the contacts collection endpoint.
    pub api_url: String,
    /// Table rows shown per page.
    pub rows_per_page: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/contacts".to_string(),
            rows_per_page: 5,
        }
    }
}

impl Config {
    /// Load using `config_path` instead of the default file, if given.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/contactbook/config.toml`.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// `<local data dir>/contactbook`, home of the default database.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "server.host must not be empty".to_string(),
            });
        }

        if self.client.rows_per_page == 0 {
            return Err(Error::ConfigValidation {
                message: "client.rows_per_page must be greater than 0".to_string(),
            });
        }

        let url = reqwest::Url::parse(&self.client.api_url).map_err(|e| Error::ConfigValidation {
            message: format!("invalid client.api_url {}: {e}", self.client.api_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ConfigValidation {
                message: format!("client.api_url must be http or https, got {}", url.scheme()),
            });
        }

        Ok(())
    }

    /// The configured database file, or `contacts.db` in the data directory.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Resolve the address the server listens on.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let host = if self.server.host == "localhost" {
            "127.0.0.1"
        } else {
            self.server.host.as_str()
        };
        let ip: IpAddr = host.parse().map_err(|_| Error::ConfigValidation {
            message: format!("server.host is not an IP address: {}", self.server.host),
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
