//! Settings: defaults, then the config file, then `AQUAVEND_*` variables

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use aquavend::{BaseUrl, MachineId};
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

/// Directory under the home dir holding `config.toml`
pub const DEFAULT_WORK_DIR: &str = ".aquavend";
/// Machine used when neither config nor command line names one
pub const DEFAULT_MACHINE_ID: &str = "VM001";

/// Overrides `api.base_url`
pub const ENV_BASE_URL: &str = "AQUAVEND_BASE_URL";
/// Overrides `api.machine_id`
pub const ENV_MACHINE_ID: &str = "AQUAVEND_MACHINE_ID";
/// Overrides `api.timeout_secs`
pub const ENV_TIMEOUT_SECS: &str = "AQUAVEND_TIMEOUT_SECS";

/// `[api]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Api {
    /// Backend base url
    pub base_url: BaseUrl,
    /// Machine used when a command is not given one
    pub machine_id: MachineId,
    /// Request timeout, unset means wait on the transport
    pub timeout_secs: Option<u64>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            machine_id: MachineId::from(DEFAULT_MACHINE_ID),
            timeout_secs: None,
        }
    }
}

impl Api {
    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Apply the `AQUAVEND_*` environment overrides
    ///
    /// A base url that does not parse is an error; a bad timeout is ignored.
    pub fn from_env(mut self) -> Result<Self> {
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            self.base_url = BaseUrl::from_str(&base_url).map_err(|err| anyhow!(err))?;
        }

        if let Ok(machine_id) = env::var(ENV_MACHINE_ID) {
            self.machine_id = MachineId::from(machine_id);
        }

        if let Ok(timeout_str) = env::var(ENV_TIMEOUT_SECS) {
            match timeout_str.parse() {
                Ok(timeout) => self.timeout_secs = Some(timeout),
                Err(_) => tracing::warn!(
                    "Invalid timeout '{}' in environment variable, keeping {:?}",
                    timeout_str,
                    self.timeout_secs
                ),
            }
        }

        Ok(self)
    }
}

/// Cli settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Backend connection
    pub api: Api,
}

impl Settings {
    /// Settings from defaults overridden by the config file
    ///
    /// An explicit `config_file_name` must be readable; the file in the
    /// default work dir is optional.
    #[must_use]
    pub fn new<P>(config_file_name: Option<P>) -> Self
    where
        P: Into<PathBuf>,
    {
        let default_settings = Self::default();
        match Self::new_from_default(&default_settings, config_file_name) {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(
                    "Error reading config file, falling back to defaults. Error: {e:?}"
                );
                default_settings
            }
        }
    }

    fn new_from_default<P>(
        default: &Settings,
        config_file_name: Option<P>,
    ) -> Result<Self, ConfigError>
    where
        P: Into<PathBuf>,
    {
        let (config, required) = match config_file_name {
            Some(value) => (value.into(), true),
            None => (
                home::home_dir()
                    .ok_or(ConfigError::NotFound("Config Path".to_string()))?
                    .join(DEFAULT_WORK_DIR)
                    .join("config.toml"),
                false,
            ),
        };

        let config: Config = Config::builder()
            // use defaults
            .add_source(Config::try_from(default)?)
            // override with file contents
            .add_source(File::from(config).required(required))
            .build()?;

        config.try_deserialize()
    }

    /// Apply the environment overrides to every section
    pub fn from_env(mut self) -> Result<Self> {
        self.api = self.api.from_env()?;
        Ok(self)
    }
}
