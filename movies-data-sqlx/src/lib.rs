//! # movies-data-sqlx: SQLite backend for the movie catalog data layer
//!
//! This crate provides the [SQLx](https://github.com/launchbadge/sqlx)-specific
//! implementations for the data access layer. It depends on [`movies-data`] for
//! the abstract traits and types, and adds the unit-of-work wrapper, the
//! SQLite repository, and error bridging needed to talk to a real database.
//!
//! # What's in this crate
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Tx`] | Transaction wrapper: one request-scoped unit of work, committed explicitly |
//! | [`HasPool`] | Trait for application states that contain a database pool |
//! | [`SqlxEntity`] | Binds an entity's value columns onto a query |
//! | [`SqlxRepository`] | `Repository<T>` implementation running inside a [`Tx`] |
//! | [`SqlxErrorExt`] | Extension trait to convert `sqlx::Error` → `DataError` (`.into_data_error()`) |
//! | [`SqlxResult<T>`] | Type alias for `Result<T, DataError>` |
//!
//! # Quick start
//!
//! ```ignore
//! use movies_data::Repository;
//! use movies_data_sqlx::Tx;
//!
//! let mut tx = Tx::begin(&pool).await?;
//! let actor = tx.repository::<Actor>().add(actor).await?;
//! tx.commit().await?;
//! ```
//!
//! # Unit of work
//!
//! - **Begin:** [`Tx::begin`] starts a transaction on a pooled connection.
//! - **Commit:** [`Tx::commit`] makes every mutation durable and visible.
//! - **Rollback:** dropping an uncommitted `Tx` discards its mutations.
//!
//! # Error bridging
//!
//! Due to Rust's orphan rules, `From<sqlx::Error> for DataError` can't be
//! implemented here. Use the [`SqlxErrorExt`] trait instead:
//!
//! ```ignore
//! use movies_data_sqlx::SqlxErrorExt;
//!
//! let row = sqlx::query("SELECT 1")
//!     .fetch_one(&pool)
//!     .await
//!     .map_err(|e| e.into_data_error())?;
//! ```

pub mod error;
pub mod repository;
pub mod tx;

pub use error::{SqlxErrorExt, SqlxResult};
pub use repository::{SqlxEntity, SqlxRepository};
pub use tx::{HasPool, Tx};

/// Re-exports of the most commonly used types from both `movies-data` and this crate.
pub mod prelude {
    pub use crate::{HasPool, SqlxEntity, SqlxErrorExt, SqlxRepository, Tx};
    pub use movies_data::prelude::*;
}
