use crate::entity::Entity;
use crate::error::DataError;
use std::future::Future;

/// Generic async repository trait for CRUD operations.
///
/// A repository works inside one unit of work (a transaction). Mutations are
/// visible to later reads through the same repository but only become
/// durable once the unit of work is committed.
///
/// Uses RPITIT (return-position `impl Trait` in traits); no `async-trait` needed.
pub trait Repository<T: Entity>: Send {
    /// All rows, in storage order.
    fn find_all(&mut self) -> impl Future<Output = Result<Vec<T>, DataError>> + Send;

    fn find_by_id(
        &mut self,
        id: &T::Id,
    ) -> impl Future<Output = Result<Option<T>, DataError>> + Send;

    fn exists(&mut self, id: &T::Id) -> impl Future<Output = Result<bool, DataError>> + Send;

    /// Insert `entity`, ignoring its id, and return it with the store-assigned id.
    fn add(&mut self, entity: T) -> impl Future<Output = Result<T, DataError>> + Send;

    /// Overwrite every value column of the row identified by `entity.id()`.
    ///
    /// Fails with [`DataError::Conflict`] when no such row exists.
    fn update(&mut self, entity: T) -> impl Future<Output = Result<T, DataError>> + Send;

    /// Fails with [`DataError::NotFound`] when the row is already gone.
    fn remove(&mut self, entity: &T) -> impl Future<Output = Result<(), DataError>> + Send;
}
