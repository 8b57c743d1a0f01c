//! Configuration loader for hospital-rs
//!
//! `ConfigLoader` assembles [`Settings`] from TOML files and environment
//! variables with a fixed precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "HOSPITAL_CONFIG_DIR";

const CONFIG_FILE_ENV: &str = "HOSPITAL_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for configuration overrides (`HOSPITAL_SERVER__PORT` -> `server.port`)
const ENV_PREFIX: &str = "HOSPITAL";

const ENV_SEPARATOR: &str = "__";

/// Plain listening port variable used by most hosting platforms
const PORT_ENV: &str = "PORT";

/// Conventional connection string variable, used when no URL is configured
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `HOSPITAL_*` environment variables
/// 5. `PORT`, and `DATABASE_URL` when `database.url` is still empty
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, only this file is read and layered loading is skipped
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `HOSPITAL_CONFIG_DIR`, `HOSPITAL_CONFIG_FILE` and
    /// `HOSPITAL_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `HOSPITAL_CONFIG_DIR` and `HOSPITAL_CONFIG_FILE`
    /// are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "HOSPITAL_CONFIG_DIR and HOSPITAL_CONFIG_FILE cannot both be set. \
                 Use HOSPITAL_CONFIG_DIR for layered configuration or \
                 HOSPITAL_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Create a loader that reads a single configuration file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Replace the environment used to pick `{environment}.toml`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load and validate configuration from all sources.
    ///
    /// # Errors
    ///
    /// - `default.toml` (or the single configured file) is missing
    /// - a source fails to parse or deserialize
    /// - the resulting settings fail validation
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        apply_platform_overrides(&mut settings)?;
        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        add_env_source(builder).build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        add_file_source(builder, &local_path, false)
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}

fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .ignore_empty(true)
            .try_parsing(true),
    )
}

fn apply_platform_overrides(settings: &mut Settings) -> Result<(), ConfigError> {
    if let Ok(port) = std::env::var(PORT_ENV) {
        settings.server.port = port.trim().parse().map_err(|_| {
            ConfigError::EnvVarError(format!("PORT must be a valid port number, got '{}'", port))
        })?;
    }

    if settings.database.url.is_empty() {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            settings.database.url = url;
        }
    }

    Ok(())
}
