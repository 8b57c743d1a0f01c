//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use crate::api::routes::create_router;
use crate::config::{DatabaseBackend, Environment, settings::Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;
use tokio::net::TcpListener;
use tokio::signal;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Opens the configured store (migrating PostgreSQL when enabled)
    /// 3. Binds to configured address
    /// 4. Starts the HTTP server with graceful shutdown
    ///
    /// # Errors
    /// - Migration or connection pool errors; the server never starts
    ///   accepting requests without a store
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            body_limit = %self.settings.server.body_limit,
            "Server configuration loaded"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        let state = self.open_store().await?;

        let router = create_router(state, self.settings.server.body_limit);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    async fn open_store(&self) -> anyhow::Result<AppState> {
        let database = &self.settings.database;
        tracing::info!(backend = database.backend.as_str(), "Opening store");

        match database.backend {
            DatabaseBackend::Memory => {
                tracing::warn!("Using in-memory store; records are lost on shutdown");
                Ok(AppState::in_memory())
            }
            DatabaseBackend::Postgres => {
                // Log pool sizing without the URL, which may hold credentials
                tracing::info!(
                    max_connections = %database.max_connections,
                    min_connections = %database.min_connections,
                    connection_timeout = %database.connection_timeout,
                    auto_migrate = %database.auto_migrate,
                    "Database configuration loaded"
                );

                if database.auto_migrate {
                    let applied = run_pending_migrations(&database.url).await.map_err(|e| {
                        tracing::error!(error = %e, "Database migration failed");
                        e
                    })?;
                    tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
                }

                let pool = establish_async_connection_pool(database).await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to connect to database");
                    e
                })?;
                tracing::info!("Connected to database");

                Ok(AppState::new(pool))
            }
        }
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// If a handler cannot be installed the failure is logged and that signal
/// is never observed.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
