use std::collections::HashMap;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::AppState;
use media_core::{
    CONTENT_SECURITY_POLICY, MediaError, RequestFlags, TransformOutcome, require_url,
};

const SERVER_NAME: &str = concat!("Rust, media-proxy/", env!("CARGO_PKG_VERSION"));

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// `GET /proxy/{type}.webp?url=...[&static][&preview][&badge]`
///
/// `{type}` 部分は解釈しない。
pub async fn proxy(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !file.ends_with(".webp") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let flags = RequestFlags::from_keys(query.keys().map(String::as_str));

    let outcome = match require_url(query.get("url").map(String::as_str)) {
        Ok(url) => {
            tracing::info!(
                url = %url,
                is_static = flags.is_static,
                preview = flags.is_preview,
                badge = flags.is_badge,
                "fetching media"
            );
            match state.fetcher.fetch(url).await {
                Ok(fetched) => crate::transform::run(state.codec.clone(), fetched, flags).await,
                Err(e) => rejected(e.into()),
            }
        }
        Err(e) => rejected(e),
    };

    outcome_response(outcome)
}

/// リクエストレベルのエラーを記録し、Rejected に変換する
fn rejected(err: MediaError) -> TransformOutcome {
    match &err {
        MediaError::Validation(msg) => {
            tracing::warn!(error = %msg, "validation error");
        }
        MediaError::Fetch(fetch_err) => {
            tracing::error!(error = %fetch_err, "failed to fetch media");
        }
        MediaError::Transform(transform_err) => {
            tracing::error!(error = %transform_err, "image processing failed");
        }
    }
    TransformOutcome::from(err)
}

/// 処理結果をレスポンスに組み立てる
///
/// Server / Content-Security-Policy は常に付与し、Cache-Control は結果ごとの方針に従う。
/// 上流が Content-Type を宣言していなかった場合は付与しない。
fn outcome_response(outcome: TransformOutcome) -> Response {
    let status = StatusCode::from_u16(outcome.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let cache_control = outcome.cache_policy().header_value();
    let content_type = HeaderValue::from_str(outcome.content_type())
        .ok()
        .filter(|value| !value.is_empty());

    let mut response = Response::new(Body::from(outcome.into_body()));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(header::SERVER, HeaderValue::from_static(SERVER_NAME));
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(cache_control));
    if let Some(content_type) = content_type {
        headers.insert(header::CONTENT_TYPE, content_type);
    }

    response
}
