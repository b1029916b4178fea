//! # movies-app
//!
//! A movie catalog: Actors and Movies, each served as a JSON API under
//! `/api/{collection}` and as HTML pages under `/{Pages}`.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`models`] | Entities, view projections and their `From` mappings |
//! | [`resource`] | The [`Resource`] trait tying an entity to its views and routes |
//! | [`controller`] | [`ResourceController`], the transactional CRUD operations |
//! | [`api`] | JSON handlers |
//! | [`ui`] | Page handlers, HTML rendering and audit emission |
//! | [`audit`] | [`AuditLog`] and its `tracing` implementation |
//! | [`state`] | [`AppState`], pool setup and migrations |
//! | [`settings`] | Typed `server` and `database` config sections |

pub mod api;
pub mod audit;
pub mod controller;
pub mod error;
pub mod models;
pub mod resource;
pub mod settings;
pub mod state;
pub mod ui;

pub use audit::{AuditAction, AuditLog, AuditRecord, TracingAuditLog};
pub use controller::ResourceController;
pub use error::CrudError;
pub use resource::Resource;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use movies_core::{catch_panic_layer, default_cors, default_trace};

use crate::models::{Actor, Movie};

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(api::routes::<Actor>())
        .merge(api::routes::<Movie>())
        .layer(default_cors());

    Router::new()
        .route("/", get(ui::home))
        .route("/health", get(|| async { "OK" }))
        .merge(ui::routes::<Actor>())
        .merge(ui::routes::<Movie>())
        .merge(api)
        .layer(default_trace())
        .layer(catch_panic_layer())
        .with_state(state)
}
