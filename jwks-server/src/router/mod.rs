//! HTTP surface: the key set endpoint, the signing endpoint and the
//! heartbeat, wrapped in request id, logging, panic and timeout middleware.

use std::{
    any::Any,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    body::HttpBody,
    extract::Request,
    http::{header, HeaderMap},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use jwks_providers::token::TokenService;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use self::error::ApiError;

pub mod error;
mod handler;


pub const JWKS_PATH: &str = "/.well-known/jwks.json";
pub const SIGN_PATH: &str = "/jwt/sign";
pub const HEALTH_PATH: &str = "/health";

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<dyn TokenService>,
}

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route(
            JWKS_PATH,
            get(handler::get_key_set).fallback(handler::method_not_allowed),
        )
        .route(
            SIGN_PATH,
            post(handler::sign_token).fallback(handler::method_not_allowed),
        )
        .route(
            HEALTH_PATH,
            get(handler::health).fallback(handler::method_not_allowed),
        )
        .fallback(handler::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn(log_request))
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(middleware::from_fn(require_json_body)),
        )
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "[{request_id}] \"{method} {path}\" {} in {:?}",
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

/// Rejects requests that carry a body which is not `application/json`.
async fn require_json_body(request: Request, next: Next) -> Response {
    let has_body = request.body().size_hint().exact() != Some(0);
    if has_body && !is_json(request.headers()) {
        return ApiError::UnsupportedMediaType.into_response();
    }

    next.run(request).await
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    log::error!("request handler panicked: {message}");

    ApiError::Internal.into_response()
}
