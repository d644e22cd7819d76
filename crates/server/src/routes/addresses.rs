use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::address::{Address, AddressPatch};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/addresses", tag = "addresses",
    responses(
        (status = 200, description = "All addresses", body = [crate::openapi::AddressDoc]),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Address>>, JsonApiError> {
    let all = state.addresses.get_all().await?;
    info!(count = all.len(), "list addresses");
    Ok(Json(all))
}

#[utoipa::path(
    get, path = "/addresses/{id}", tag = "addresses",
    params(("id" = i64, Path, description = "Address id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AddressDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, JsonApiError> {
    Ok(match state.addresses.get_by_id(id).await? {
        Some(address) => Json(address).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

#[utoipa::path(
    post, path = "/addresses", tag = "addresses",
    request_body = crate::openapi::AddressInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::AddressDoc),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Address>, JsonRejection>,
) -> Result<Json<Address>, JsonApiError> {
    let Json(input) = payload?;
    let created = state.addresses.create(input).await?;
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/addresses/{id}", tag = "addresses",
    params(("id" = i64, Path, description = "Address id")),
    request_body = crate::openapi::AddressInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AddressDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<AddressPatch>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(patch) = payload?;
    Ok(match state.addresses.update(id, patch).await? {
        Some(updated) => Json(updated).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

#[utoipa::path(
    delete, path = "/addresses/{id}", tag = "addresses",
    params(("id" = i64, Path, description = "Address id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, JsonApiError> {
    if state.addresses.delete(id).await? {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}
