//! Transaction wrapper used as the per-request unit of work.

use sqlx::{Database, Pool, Sqlite, Transaction};
use std::ops::{Deref, DerefMut};

use crate::error::{SqlxErrorExt, SqlxResult};
use crate::repository::{SqlxEntity, SqlxRepository};

/// Trait for application states that contain a database pool.
///
/// ```ignore
/// impl HasPool<Sqlite> for AppState {
///     fn pool(&self) -> &Pool<Sqlite> {
///         &self.pool
///     }
/// }
/// ```
pub trait HasPool<DB: Database> {
    fn pool(&self) -> &Pool<DB>;
}

impl<DB: Database> HasPool<DB> for Pool<DB> {
    fn pool(&self) -> &Pool<DB> {
        self
    }
}

/// A wrapper around SQLx [`Transaction`].
///
/// - Begun from a pool with [`Tx::begin`]
/// - Committed with [`Tx::commit`]
/// - Rolled back on drop if never committed
pub struct Tx<'a, DB: Database>(pub Transaction<'a, DB>);

impl<'a, DB: Database> Deref for Tx<'a, DB> {
    type Target = Transaction<'a, DB>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, DB: Database> DerefMut for Tx<'a, DB> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a, DB: Database> Tx<'a, DB> {
    /// Unwraps the `Tx` into the inner `Transaction`.
    pub fn into_inner(self) -> Transaction<'a, DB> {
        self.0
    }

    /// Returns a mutable reference to the underlying connection.
    pub fn as_mut(&mut self) -> &mut <DB as Database>::Connection {
        &mut *self.0
    }
}

impl<DB: Database> Tx<'static, DB> {
    /// Begin a new transaction from the state's pool.
    pub async fn begin(state: &impl HasPool<DB>) -> SqlxResult<Self> {
        let tx = state.pool().begin().await.map_err(|e| e.into_data_error())?;
        Ok(Tx(tx))
    }

    /// Commit every mutation made through this transaction.
    pub async fn commit(self) -> SqlxResult<()> {
        self.into_inner()
            .commit()
            .await
            .map_err(|e| e.into_data_error())
    }
}

impl Tx<'static, Sqlite> {
    /// A repository for `T` bound to this transaction.
    pub fn repository<T: SqlxEntity>(&mut self) -> SqlxRepository<'_, T> {
        SqlxRepository::new(self)
    }
}
