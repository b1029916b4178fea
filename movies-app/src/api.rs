//! JSON API: `/api/{collection}` and `/api/{collection}/{id}`.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use movies_core::{ApiResult, JsonResult};
use movies_data::Entity;

use crate::resource::Resource;
use crate::state::AppState;

pub fn routes<E: Resource>() -> Router<AppState> {
    let collection = format!("/api/{}", E::COLLECTION);
    let item = format!("{collection}/{{id}}");
    Router::new()
        .route(&collection, get(list::<E>).post(create::<E>))
        .route(
            &item,
            get(get_by_id::<E>).put(update::<E>).delete(delete::<E>),
        )
}

async fn list<E: Resource>(State(state): State<AppState>) -> JsonResult<Vec<E::View>> {
    let views = state.resource::<E>().list().await?;
    Ok(Json(views))
}

async fn get_by_id<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> JsonResult<E::View> {
    let view = state.resource::<E>().get_by_id(id).await?;
    Ok(Json(view))
}

/// `201 Created` with a `Location` header; the body echoes the submitted input.
async fn create<E: Resource>(
    State(state): State<AppState>,
    Json(input): Json<E::Input>,
) -> ApiResult<impl IntoResponse> {
    let created = state.resource::<E>().create(input.clone()).await?;
    let location = format!("/api/{}/{}", E::COLLECTION, created.id());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(input)))
}

async fn update<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(edit): Json<E::Edit>,
) -> JsonResult<E::View> {
    let updated = state.resource::<E>().update(id, edit).await?;
    Ok(Json(E::View::from(&updated)))
}

async fn delete<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> JsonResult<E::Deleted> {
    let deleted = state.resource::<E>().delete(id).await?;
    Ok(Json(E::Deleted::from(&deleted)))
}
