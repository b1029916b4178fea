pub mod app;

pub use app::{resolve_path, TestApp, TestRequest, TestResponse};
