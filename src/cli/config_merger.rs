//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments override everything the [`ConfigLoader`] produced.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Holds the file/env configuration that CLI overrides are applied to.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration the way `cli` asks for.
    ///
    /// `--config` selects a single file; otherwise layered loading is used.
    /// `--env` replaces the environment read from `HOSPITAL_APP_ENV`.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match cli.config {
            Some(ref path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Precedence, highest first:
    /// 1. `serve` options (`--host`, `--port`, `--log-level`)
    /// 2. Global flags (`--verbose`, `--quiet`)
    /// 3. Configuration files and environment variables
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        apply_global_overrides(&mut config, cli);
        if let Some(ref command) = cli.command {
            apply_command_overrides(&mut config, command);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
    if cli.verbose {
        config.logger.level = "debug".to_string();
    } else if cli.quiet {
        config.logger.level = "error".to_string();
    }
}

fn apply_command_overrides(config: &mut Settings, command: &Commands) {
    match command {
        Commands::Serve {
            host,
            port,
            log_level,
            dry_run: _,
        } => {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseBackend;
    use clap::Parser;

    fn merger() -> ConfigurationMerger {
        let mut config = Settings::default();
        config.database.backend = DatabaseBackend::Memory;
        ConfigurationMerger::new(config)
    }

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        merger().merge_cli_args(&cli).unwrap()
    }

    #[test]
    fn test_no_args_keep_base_config() {
        let merger = merger();
        let cli = Cli::try_parse_from(["hospital-rs"]).unwrap();
        assert_eq!(&merger.merge_cli_args(&cli).unwrap(), merger.config());
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["hospital-rs", "--verbose"]).logger.level, "debug");
        assert_eq!(merge(&["hospital-rs", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_serve_host_and_port() {
        let config = merge(&["hospital-rs", "serve", "--host", "127.0.0.1", "--port", "8080"]);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let config = merge(&["hospital-rs", "--verbose", "serve", "--log-level", "warn"]);
        assert_eq!(config.logger.level, "warn");
    }

    #[test]
    fn test_merged_config_is_validated() {
        // Postgres without a URL cannot be served
        let merger = ConfigurationMerger::new(Settings::default());
        let cli = Cli::try_parse_from(["hospital-rs", "serve"]).unwrap();
        assert!(merger.merge_cli_args(&cli).is_err());
    }
}
