//! # movies-core
//!
//! Shared runtime pieces for the movie catalog service:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered YAML / `.env` / environment configuration |
//! | [`error`] | [`HttpError`], the JSON error type returned by handlers |
//! | [`validation`] | Bridges `garde` reports into typed field errors |
//! | [`layers`] | Tracing subscriber setup and tower-http layers |
//! | [`types`] | Handler result aliases |

pub mod config;
pub mod error;
pub mod layers;
pub mod types;
pub mod validation;

pub use config::{ConfigError, ConfigSection, ConfigValue, FromConfigValue, MoviesConfig};
pub use error::{error_response, HttpError};
pub use layers::{catch_panic_layer, default_cors, default_trace, init_tracing};
pub use types::{ApiResult, JsonResult};
pub use validation::{validate, FieldError, ValidationErrorResponse};
