use std::marker::PhantomData;

use movies_data::{DataError, Entity, Repository};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

use crate::error::SqlxErrorExt;
use crate::tx::Tx;

/// A query over SQLite with positional arguments.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// An [`Entity`] that can be read from and written to SQLite.
///
/// `bind_values` must bind exactly [`Entity::value_columns`], in that order.
///
/// ```ignore
/// impl SqlxEntity for Actor {
///     fn bind_values<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
///         query
///             .bind(&self.first_name)
///             .bind(&self.last_name)
///             .bind(self.birth_date)
///     }
/// }
/// ```
pub trait SqlxEntity: Entity<Id = i64> + for<'r> FromRow<'r, SqliteRow> {
    fn bind_values<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

/// A generic SQL-based repository bound to one transaction.
///
/// SQL is derived from the [`Entity`] metadata; rows are decoded through
/// `sqlx::FromRow`.
///
/// # Example
///
/// ```ignore
/// let mut tx = Tx::begin(&pool).await?;
/// let actors = SqlxRepository::<Actor>::new(&mut tx).find_all().await?;
/// ```
pub struct SqlxRepository<'t, T> {
    tx: &'t mut Tx<'static, Sqlite>,
    _marker: PhantomData<T>,
}

impl<'t, T: SqlxEntity> SqlxRepository<'t, T> {
    pub fn new(tx: &'t mut Tx<'static, Sqlite>) -> Self {
        Self {
            tx,
            _marker: PhantomData,
        }
    }

    fn select_sql(filter_by_id: bool) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            T::columns().join(", "),
            T::table_name()
        );
        if filter_by_id {
            sql.push_str(&format!(" WHERE {} = ?", T::id_column()));
        }
        sql.push_str(&format!(" ORDER BY {}", T::id_column()));
        sql
    }

    fn insert_sql() -> String {
        let columns = T::value_columns();
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            T::table_name(),
            columns.join(", ")
        )
    }

    fn update_sql() -> String {
        let assignments = T::value_columns()
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {assignments} WHERE {} = ?",
            T::table_name(),
            T::id_column()
        )
    }
}

impl<T: SqlxEntity> Repository<T> for SqlxRepository<'_, T> {
    async fn find_all(&mut self) -> Result<Vec<T>, DataError> {
        let sql = Self::select_sql(false);
        sqlx::query_as::<_, T>(&sql)
            .fetch_all(self.tx.as_mut())
            .await
            .map_err(|e| e.into_data_error())
    }

    async fn find_by_id(&mut self, id: &i64) -> Result<Option<T>, DataError> {
        let sql = Self::select_sql(true);
        sqlx::query_as::<_, T>(&sql)
            .bind(*id)
            .fetch_optional(self.tx.as_mut())
            .await
            .map_err(|e| e.into_data_error())
    }

    async fn exists(&mut self, id: &i64) -> Result<bool, DataError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?)",
            T::table_name(),
            T::id_column()
        );
        let (found,): (i64,) = sqlx::query_as(&sql)
            .bind(*id)
            .fetch_one(self.tx.as_mut())
            .await
            .map_err(|e| e.into_data_error())?;
        Ok(found != 0)
    }

    async fn add(&mut self, mut entity: T) -> Result<T, DataError> {
        let sql = Self::insert_sql();
        let result = entity
            .bind_values(sqlx::query(&sql))
            .execute(self.tx.as_mut())
            .await
            .map_err(|e| e.into_data_error())?;
        entity.set_id(result.last_insert_rowid());
        tracing::debug!(table = T::table_name(), id = *entity.id(), "row inserted");
        Ok(entity)
    }

    async fn update(&mut self, entity: T) -> Result<T, DataError> {
        let sql = Self::update_sql();
        let id = *entity.id();
        let result = entity
            .bind_values(sqlx::query(&sql))
            .bind(id)
            .execute(self.tx.as_mut())
            .await
            .map_err(|e| e.into_data_error())?;
        if result.rows_affected() == 0 {
            return Err(DataError::Conflict(format!(
                "no row in {} with {} = {id}",
                T::table_name(),
                T::id_column()
            )));
        }
        tracing::debug!(table = T::table_name(), id, "row updated");
        Ok(entity)
    }

    async fn remove(&mut self, entity: &T) -> Result<(), DataError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            T::table_name(),
            T::id_column()
        );
        let id = *entity.id();
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.tx.as_mut())
            .await
            .map_err(|e| e.into_data_error())?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound(format!(
                "no row in {} with {} = {id}",
                T::table_name(),
                T::id_column()
            )));
        }
        tracing::debug!(table = T::table_name(), id, "row deleted");
        Ok(())
    }
}
