//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::config::ApiConfig;
use crate::services::AuthService;

/// Interval between background sweeps of expired sessions.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database connection pool and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: SqlitePool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ApiConfig, pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Spawn the hourly background task that deletes expired sessions.
    ///
    /// Expiry is also enforced lazily on every login and token lookup; this
    /// task just keeps the sessions table from accumulating dead rows while
    /// the service is idle.
    pub fn start_session_sweeper(&self) {
        let state = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            // The first tick fires immediately; skip it so startup stays quiet.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let auth = AuthService::new(state.pool());
                match auth.sweep_expired().await {
                    Ok(0) => {}
                    Ok(swept) => tracing::info!(swept, "Swept expired sessions"),
                    Err(error) => tracing::error!(%error, "Session sweep failed"),
                }
            }
        });
    }
}
