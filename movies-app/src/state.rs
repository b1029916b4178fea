use std::str::FromStr;
use std::sync::Arc;

use movies_data::DataError;
use movies_data_sqlx::{HasPool, SqlxErrorExt};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::audit::AuditLog;
use crate::controller::ResourceController;
use crate::resource::Resource;
use crate::settings::DatabaseConfig;
use crate::ui::PageController;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub audit: Arc<dyn AuditLog>,
}

impl AppState {
    pub fn new(pool: SqlitePool, audit: Arc<dyn AuditLog>) -> Self {
        Self { pool, audit }
    }

    pub fn resource<E: Resource>(&self) -> ResourceController<E> {
        ResourceController::new(self.pool.clone())
    }

    pub fn pages<E: Resource>(&self) -> PageController<E> {
        PageController::new(self.resource(), self.audit.clone())
    }
}

impl HasPool<Sqlite> for AppState {
    fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

/// Open the pool described by `config` and bring the schema up to date.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DataError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| e.into_data_error())?
        .create_if_missing(true);

    // An in-memory database lives only as long as its connection.
    let pool = SqlitePoolOptions::new()
        .max_connections(config.connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| e.into_data_error())?;

    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), DataError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(DataError::database)?;
    tracing::debug!("migrations applied");
    Ok(())
}
