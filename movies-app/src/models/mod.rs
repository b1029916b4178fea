//! Catalog entities and their view projections.

pub mod actor;
pub mod movie;

pub use actor::{Actor, ActorView, DeleteActor, EditActor, InputActor};
pub use movie::{DeleteMovie, EditMovie, InputMovie, Movie, MovieView};

use chrono::NaiveDate;

/// Rejects dates later than today.
pub(crate) fn not_in_future(value: &NaiveDate, _ctx: &()) -> garde::Result {
    if *value > chrono::Local::now().date_naive() {
        return Err(garde::Error::new("date cannot be in the future"));
    }
    Ok(())
}

/// Rejects NaN and the infinities, which `range` lets through.
pub(crate) fn finite(value: &f64, _ctx: &()) -> garde::Result {
    if !value.is_finite() {
        return Err(garde::Error::new("must be a finite number"));
    }
    Ok(())
}
