//! Server-rendered pages: `/{Pages}`, `/{Pages}/Details/{id}`,
//! `/{Pages}/Create`, `/{Pages}/Edit/{id}` and `/{Pages}/Delete/{id}`.
//!
//! Mutations redirect to the list page on success and are reported to the
//! [`AuditLog`] once committed.

pub mod form;
pub mod pages;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use movies_core::ValidationErrorResponse;
use movies_data::Entity;
use serde::Serialize;
use serde_json::Value;

use crate::audit::{AuditAction, AuditLog, AuditRecord};
use crate::controller::ResourceController;
use crate::error::CrudError;
use crate::resource::Resource;
use crate::state::AppState;
use form::PageForm;
use pages::FormMode;

/// Page-rendering front for a [`ResourceController`].
pub struct PageController<E> {
    resource: ResourceController<E>,
    audit: Arc<dyn AuditLog>,
}

impl<E: Resource> PageController<E> {
    pub fn new(resource: ResourceController<E>, audit: Arc<dyn AuditLog>) -> Self {
        Self { resource, audit }
    }

    fn list_location() -> String {
        format!("/{}", E::PAGES)
    }

    pub async fn index(&self) -> Result<Html<String>, UiError> {
        let views = self.resource.list().await?;
        let rows = views.iter().map(to_json).collect::<Result<Vec<_>, _>>()?;
        Ok(Html(pages::index::<E>(&rows)))
    }

    pub async fn details(&self, id: i64) -> Result<Html<String>, UiError> {
        let view = self.resource.get_by_id(id).await?;
        Ok(Html(pages::details::<E>(&to_json(&view)?)))
    }

    pub fn show_create_form(&self) -> Html<String> {
        Html(pages::form::<E>(FormMode::Create, &Value::Null, None))
    }

    /// Unparseable or invalid input re-renders the form with the submitted
    /// text and the field errors.
    pub async fn create(&self, form: PageForm) -> Result<Response, UiError> {
        let input = match form.parse::<E, E::Input>() {
            Ok(input) => input,
            Err(errors) => return Ok(Self::rerender(FormMode::Create, &form, &errors)),
        };
        match self.resource.create(input).await {
            Ok(created) => {
                self.audit(AuditAction::Created, &created)?;
                Ok(Redirect::to(&Self::list_location()).into_response())
            }
            Err(CrudError::Validation(errors)) => {
                Ok(Self::rerender(FormMode::Create, &form, &errors))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Prefilled edit form. Opening it is not audited.
    pub async fn show_edit_form(&self, id: i64) -> Result<Html<String>, UiError> {
        let record = self.resource.find(id).await?;
        let edit = E::Edit::from(&record);
        Ok(Html(pages::form::<E>(FormMode::Edit(id), &to_json(&edit)?, None)))
    }

    pub async fn update(&self, id: i64, form: PageForm) -> Result<Response, UiError> {
        let edit = match form.parse::<E, E::Edit>() {
            Ok(edit) => edit,
            Err(errors) => return Ok(Self::rerender(FormMode::Edit(id), &form, &errors)),
        };
        match self.resource.update(id, edit).await {
            Ok(updated) => {
                self.audit(AuditAction::Updated, &updated)?;
                Ok(Redirect::to(&Self::list_location()).into_response())
            }
            Err(CrudError::Validation(errors)) => {
                Ok(Self::rerender(FormMode::Edit(id), &form, &errors))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn show_delete_confirmation(&self, id: i64) -> Result<Html<String>, UiError> {
        let record = self.resource.find(id).await?;
        let deleted = E::Deleted::from(&record);
        Ok(Html(pages::delete_confirmation::<E>(&to_json(&deleted)?)))
    }

    pub async fn delete(&self, id: i64) -> Result<Redirect, UiError> {
        let deleted = self.resource.delete(id).await?;
        self.audit(AuditAction::Deleted, &deleted)?;
        Ok(Redirect::to(&Self::list_location()))
    }

    fn rerender(mode: FormMode, form: &PageForm, errors: &ValidationErrorResponse) -> Response {
        let page = pages::form::<E>(mode, &form.values::<E>(), Some(errors));
        Html(page).into_response()
    }

    fn audit(&self, action: AuditAction, record: &E) -> Result<(), UiError> {
        let view = to_json(&E::View::from(record))?;
        let fields = E::FIELDS
            .iter()
            .map(|field| (field.name, pages::display(&view[field.name])))
            .collect();
        self.audit.record(&AuditRecord {
            action,
            resource: E::NAME,
            id: *record.id(),
            fields,
        });
        Ok(())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, UiError> {
    serde_json::to_value(value).map_err(UiError::Render)
}

/// A failed page request, rendered as an HTML error page.
#[derive(Debug)]
pub enum UiError {
    Crud(CrudError),
    /// A view could not be turned into page data.
    Render(serde_json::Error),
}

impl From<CrudError> for UiError {
    fn from(err: CrudError) -> Self {
        UiError::Crud(err)
    }
}

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            UiError::Crud(
                err @ (CrudError::NotFound { .. } | CrudError::UpdateTargetMissing { .. }),
            ) => (StatusCode::NOT_FOUND, err.to_string()),
            UiError::Crud(err @ CrudError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            UiError::Crud(CrudError::Storage(err)) => {
                tracing::error!(error = %err, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong.".to_string(),
                )
            }
            UiError::Render(err) => {
                tracing::error!(error = %err, "page rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong.".to_string(),
                )
            }
        };
        (status, Html(pages::error_page(status, &message))).into_response()
    }
}

pub fn routes<E: Resource>() -> Router<AppState> {
    let base = format!("/{}", E::PAGES);
    Router::new()
        .route(&base, get(index::<E>))
        .route(&format!("{base}/Index"), get(index::<E>))
        .route(&format!("{base}/Details/{{id}}"), get(details::<E>))
        .route(
            &format!("{base}/Create"),
            get(create_form::<E>).post(create::<E>),
        )
        .route(
            &format!("{base}/Edit/{{id}}"),
            get(edit_form::<E>).post(edit::<E>),
        )
        .route(
            &format!("{base}/Delete/{{id}}"),
            get(delete_confirmation::<E>).post(delete::<E>),
        )
}

/// Landing page linking both catalogs.
pub async fn home() -> Html<String> {
    Html(pages::home())
}

async fn index<E: Resource>(State(state): State<AppState>) -> Result<Html<String>, UiError> {
    state.pages::<E>().index().await
}

async fn details<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, UiError> {
    state.pages::<E>().details(id).await
}

async fn create_form<E: Resource>(State(state): State<AppState>) -> Html<String> {
    state.pages::<E>().show_create_form()
}

async fn create<E: Resource>(
    State(state): State<AppState>,
    Form(form): Form<PageForm>,
) -> Result<Response, UiError> {
    state.pages::<E>().create(form).await
}

async fn edit_form<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, UiError> {
    state.pages::<E>().show_edit_form(id).await
}

async fn edit<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<PageForm>,
) -> Result<Response, UiError> {
    state.pages::<E>().update(id, form).await
}

async fn delete_confirmation<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, UiError> {
    state.pages::<E>().show_delete_confirmation(id).await
}

async fn delete<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, UiError> {
    state.pages::<E>().delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn unserializable_view_is_a_render_error() {
        let keyed_by_pair: HashMap<(i32, i32), i32> = [((1, 2), 3)].into_iter().collect();
        let err = to_json(&keyed_by_pair).unwrap_err();
        assert!(matches!(err, UiError::Render(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_record_is_a_not_found_page() {
        let resp = UiError::from(CrudError::not_found("Actor", 3)).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
