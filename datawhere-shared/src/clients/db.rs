use std::sync::Arc;

use diesel::pg::PgConnection;
use diesel::Connection;

use crate::errors::{AppError, AppResult};

/// Opens one PostgreSQL connection per unit of work. There is no pool: every
/// call to [`ConnectionProvider::run`] establishes a fresh connection and
/// closes it when the closure returns.
#[derive(Clone)]
pub struct ConnectionProvider {
    database_url: Arc<str>,
}

impl ConnectionProvider {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: Arc::from(database_url.into()),
        }
    }

    /// Blocking connect. A malformed URL or an unreachable server surfaces as
    /// `diesel::ConnectionError`, untranslated.
    pub fn connect(&self) -> Result<PgConnection, diesel::ConnectionError> {
        PgConnection::establish(&self.database_url)
    }

    /// Runs `work` against a fresh connection on the blocking thread pool.
    /// Rows are read through `QueryableByName`/`Queryable` models, so callers
    /// address columns by name.
    pub async fn run<T, E, F>(&self, work: F) -> AppResult<T>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        E: Into<AppError> + Send + 'static,
        T: Send + 'static,
    {
        let provider = self.clone();
        tokio::task::spawn_blocking(move || -> AppResult<T> {
            let mut conn = provider.connect()?;
            tracing::debug!("database connection opened");
            let result = work(&mut conn).map_err(Into::into);
            drop(conn);
            tracing::debug!("database connection closed");
            result
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("database task failed: {e}")))?
    }
}

impl std::fmt::Debug for ConnectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider").finish_non_exhaustive()
    }
}
