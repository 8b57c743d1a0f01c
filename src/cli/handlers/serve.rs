//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::cli::init_logger_from_settings;
use crate::config::DatabaseBackend;
use crate::config::settings::Settings;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the serve command
    ///
    /// With `dry_run` the configuration is checked and summarized on stdout;
    /// otherwise the logger is installed and the server runs until shutdown.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Logger initialization errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(&self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }

        init_logger_from_settings(&self.config)?;
        Server::new(self.config.clone()).run().await
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;
        // Fails on bad log formats that plain validation lets through
        self.config.logger.clone().into_logger_config()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.database.backend {
            DatabaseBackend::Memory => println!("✓ Storage: in-memory (data is not persisted)"),
            DatabaseBackend::Postgres => println!(
                "✓ Storage: postgres (auto_migrate = {})",
                self.config.database.auto_migrate
            ),
        }
        println!("✓ Logger configuration is valid");
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> Settings {
        let mut config = Settings::default();
        config.database.backend = DatabaseBackend::Memory;
        config
    }

    #[test]
    fn test_serve_handler_new() {
        let config = memory_config();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run() {
        let handler = ServeCommandHandler::new(memory_config());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_invalid_config() {
        let mut config = memory_config();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config);
        assert!(handler.execute(true).await.is_err());
    }
}
