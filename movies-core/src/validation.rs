use serde::Serialize;

// Re-export garde::Validate for convenience.
pub use garde::Validate;

/// A field-level validation error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Container for validation errors, used as the payload of `HttpError::Validation`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl ValidationErrorResponse {
    /// First error message reported for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Run `garde` validation on `value`, collecting every failure into a
/// [`ValidationErrorResponse`].
pub fn validate<T>(value: &T) -> Result<(), ValidationErrorResponse>
where
    T: Validate,
    T::Context: Default,
{
    value.validate().map_err(|report| convert_garde_report(&report))
}

fn convert_garde_report(report: &garde::Report) -> ValidationErrorResponse {
    let errors = report
        .iter()
        .map(|(path, error)| {
            let field = {
                let s = path.to_string();
                if s.is_empty() { "value".to_string() } else { s }
            };
            FieldError {
                field,
                message: error.message().to_string(),
                code: "validation".to_string(),
            }
        })
        .collect();

    ValidationErrorResponse { errors }
}
