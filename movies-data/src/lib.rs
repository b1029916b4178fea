pub mod entity;
pub mod error;
pub mod repository;

pub use entity::Entity;
pub use error::DataError;
pub use repository::Repository;

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{DataError, Entity, Repository};
}
