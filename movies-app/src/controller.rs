use std::marker::PhantomData;

use movies_core::validate;
use movies_data::{Entity, Repository};
use movies_data_sqlx::Tx;
use sqlx::{Sqlite, SqlitePool};

use crate::error::CrudError;
use crate::resource::Resource;

/// CRUD orchestration for one resource.
///
/// Every operation runs in its own transaction: begun on entry, committed
/// after a successful mutation, rolled back on drop otherwise.
pub struct ResourceController<E> {
    pool: SqlitePool,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceController<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E: Resource> ResourceController<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    async fn begin(&self) -> Result<Tx<'static, Sqlite>, CrudError> {
        Ok(Tx::begin(&self.pool).await?)
    }

    /// Every record, in storage order.
    pub async fn list(&self) -> Result<Vec<E::View>, CrudError> {
        let mut tx = self.begin().await?;
        let records = tx.repository::<E>().find_all().await?;
        Ok(records.iter().map(E::View::from).collect())
    }

    pub async fn find(&self, id: i64) -> Result<E, CrudError> {
        let mut tx = self.begin().await?;
        let found = tx.repository::<E>().find_by_id(&id).await?;
        found.ok_or_else(|| CrudError::not_found(E::NAME, id))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<E::View, CrudError> {
        let record = self.find(id).await?;
        Ok(E::View::from(&record))
    }

    /// Validates and stores a new record. The store assigns the id.
    pub async fn create(&self, input: E::Input) -> Result<E, CrudError> {
        validate(&input)?;
        let mut tx = self.begin().await?;
        let created = tx.repository::<E>().add(input.into()).await?;
        tx.commit().await?;
        tracing::info!(resource = E::NAME, id = *created.id(), "record created");
        Ok(created)
    }

    /// Overwrites every editable field of record `id`.
    ///
    /// The write is attempted without a prior lookup. When it matches no
    /// row, a follow-up existence check decides between
    /// [`CrudError::UpdateTargetMissing`] and the original storage error.
    pub async fn update(&self, id: i64, edit: E::Edit) -> Result<E, CrudError> {
        validate(&edit)?;
        let mut entity: E = edit.into();
        entity.set_id(id);

        let mut tx = self.begin().await?;
        let result = tx.repository::<E>().update(entity).await;
        match result {
            Ok(updated) => {
                tx.commit().await?;
                tracing::info!(resource = E::NAME, id, "record updated");
                Ok(updated)
            }
            Err(err) if err.is_conflict() => {
                let exists = tx.repository::<E>().exists(&id).await?;
                if exists {
                    Err(CrudError::Storage(err))
                } else {
                    Err(CrudError::UpdateTargetMissing {
                        resource: E::NAME,
                        id,
                    })
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Removes record `id`, returning it as it was before removal.
    pub async fn delete(&self, id: i64) -> Result<E, CrudError> {
        let mut tx = self.begin().await?;
        let found = tx.repository::<E>().find_by_id(&id).await?;
        let record = found.ok_or_else(|| CrudError::not_found(E::NAME, id))?;
        tx.repository::<E>().remove(&record).await?;
        tx.commit().await?;
        tracing::info!(resource = E::NAME, id, "record deleted");
        Ok(record)
    }
}
