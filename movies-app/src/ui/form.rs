use std::collections::HashMap;

use chrono::NaiveDate;
use movies_core::{FieldError, ValidationErrorResponse};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::resource::{FieldKind, Resource};

/// A submitted HTML form, every input kept as the text the browser sent.
///
/// Dates and numbers are parsed by [`PageForm::parse`], so an empty or
/// malformed input is reported as a field error instead of rejecting the
/// whole request.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct PageForm(HashMap<String, String>);

impl PageForm {
    fn text(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    /// The submitted text of `E`'s fields, for re-rendering the form.
    pub fn values<E: Resource>(&self) -> Value {
        let object: Map<String, Value> = E::FIELDS
            .iter()
            .map(|field| (field.name.to_string(), Value::String(self.text(field.name).to_string())))
            .collect();
        Value::Object(object)
    }

    /// Build a typed view from the submitted fields of `E`.
    pub fn parse<E: Resource, T: DeserializeOwned>(&self) -> Result<T, ValidationErrorResponse> {
        let mut object = Map::new();
        let mut errors = Vec::new();

        for field in E::FIELDS {
            let raw = self.text(field.name);
            let parsed = match field.kind {
                FieldKind::Text => Ok(Value::String(raw.to_string())),
                FieldKind::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map(|date| Value::String(date.to_string()))
                    .map_err(|_| "must be a date (YYYY-MM-DD)"),
                FieldKind::Number => raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or("must be a number"),
            };
            match parsed {
                Ok(value) => {
                    object.insert(field.name.to_string(), value);
                }
                Err(message) => errors.push(parse_error(field.path, message.to_string())),
            }
        }

        if !errors.is_empty() {
            return Err(ValidationErrorResponse { errors });
        }
        serde_json::from_value(Value::Object(object)).map_err(|err| ValidationErrorResponse {
            errors: vec![parse_error("value", err.to_string())],
        })
    }
}

fn parse_error(field: &str, message: String) -> FieldError {
    FieldError {
        field: field.to_string(),
        message,
        code: "parse".to_string(),
    }
}
