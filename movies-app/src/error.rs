use movies_core::{HttpError, ValidationErrorResponse};
use movies_data::DataError;

/// Failure of a catalog operation, before it is shaped into an HTTP response.
#[derive(Debug)]
pub enum CrudError {
    /// No record with this id.
    NotFound { resource: &'static str, id: i64 },
    /// An update matched no row and a follow-up lookup found no record.
    UpdateTargetMissing { resource: &'static str, id: i64 },
    Validation(ValidationErrorResponse),
    Storage(DataError),
}

impl CrudError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        CrudError::NotFound { resource, id }
    }
}

impl std::fmt::Display for CrudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrudError::NotFound { resource, id } => write!(f, "{resource} {id} not found"),
            CrudError::UpdateTargetMissing { resource, id } => {
                write!(f, "{resource} {id} does not exist")
            }
            CrudError::Validation(resp) => {
                write!(f, "validation failed: {} errors", resp.errors.len())
            }
            CrudError::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CrudError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrudError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DataError> for CrudError {
    fn from(err: DataError) -> Self {
        CrudError::Storage(err)
    }
}

impl From<ValidationErrorResponse> for CrudError {
    fn from(resp: ValidationErrorResponse) -> Self {
        CrudError::Validation(resp)
    }
}

impl From<CrudError> for HttpError {
    fn from(err: CrudError) -> Self {
        match err {
            CrudError::NotFound { .. } => HttpError::NotFound(err.to_string()),
            CrudError::UpdateTargetMissing { .. } => HttpError::BadRequest(err.to_string()),
            CrudError::Validation(resp) => HttpError::Validation(resp),
            CrudError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                HttpError::Internal("Internal server error".to_string())
            }
        }
    }
}
