//! メディアプロキシの HTTP アダプタ
//!
//! ルーティングとレスポンス組み立てのみを担い、取得・分類・変換は media-core に委譲する。

pub mod config;
pub mod handler;
pub mod transform;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use media_core::{Codec, MediaFetcher};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: MediaFetcher,
    pub codec: Arc<dyn Codec>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route("/proxy/{file}", get(handler::proxy))
        .with_state(state)
}
