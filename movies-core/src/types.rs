//! Convenience type aliases for common handler return types.
//!
//! ```ignore
//! async fn list(State(state): State<AppState>) -> JsonResult<Vec<ActorView>> { ... }
//! ```

use axum::Json;

use crate::error::HttpError;

/// Flexible result alias: any response type with [`HttpError`].
pub type ApiResult<T> = Result<T, HttpError>;

/// The most common handler return type: `Result<Json<T>, HttpError>`.
pub type JsonResult<T> = Result<Json<T>, HttpError>;
