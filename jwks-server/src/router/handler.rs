use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use jwks_providers::{
    common_models::JwkSet,
    token::{ClaimSet, ProtectedHeaderSet},
};

use super::{error::ApiError, AppState};
use crate::model::SignResponseDTO;

pub(super) async fn get_key_set(State(state): State<AppState>) -> Result<Json<JwkSet>, ApiError> {
    state
        .token_service
        .key_set()
        .map(Json)
        .map_err(ApiError::KeySet)
}

pub(super) async fn sign_token(
    State(state): State<AppState>,
    body: Result<Json<ClaimSet>, JsonRejection>,
) -> Result<(StatusCode, Json<SignResponseDTO>), ApiError> {
    let Json(claims) = body?;

    // RSA signing is CPU bound; keep it off the reactor.
    let token_service = state.token_service.clone();
    let jwt = tokio::task::spawn_blocking(move || {
        token_service.sign_token(&claims, &ProtectedHeaderSet::new())
    })
    .await
    .map_err(|e| {
        log::error!("signing task failed: {e}");
        ApiError::Internal
    })??;

    Ok((StatusCode::CREATED, Json(SignResponseDTO { jwt })))
}

pub(super) async fn health() -> StatusCode {
    StatusCode::OK
}

pub(super) async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub(super) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
