//! # CORS ミドルウェア
//!
//! Auth Service の CORS ポリシーは固定:
//!
//! | ヘッダー | 値 |
//! |---------|-----|
//! | `Access-Control-Allow-Origin` | `*` |
//! | `Access-Control-Allow-Methods` | `POST, OPTIONS` |
//! | `Access-Control-Allow-Headers` | `Content-Type` |
//!
//! - [`preflight`]: すべてのパスの `OPTIONS` に 200（ボディなし）で応答する。Router 全体に `layer` で適用
//! - [`apply_cors_headers`]: ルートに一致したレスポンスにのみ CORS ヘッダーを付与する。`route_layer` で適用
//!
//! 未定義パスの 404 には CORS ヘッダーを付けない。

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode, header::ORIGIN},
    middleware::Next,
    response::{IntoResponse, Response},
};
use edgeblog_shared::cors::{AllowOrigin, CorsPolicy};

/// CORS ミドルウェアの状態
#[derive(Debug, Clone)]
pub struct CorsState {
    pub policy: CorsPolicy,
}

impl Default for CorsState {
    fn default() -> Self {
        Self {
            policy: CorsPolicy::new(AllowOrigin::Any, "POST, OPTIONS", "Content-Type"),
        }
    }
}

/// OPTIONS プリフライトに応答する
pub async fn preflight(
    State(state): State<Arc<CorsState>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    let headers = state.policy.headers_for(request.headers().get(ORIGIN));
    (StatusCode::OK, headers).into_response()
}

/// レスポンスに CORS ヘッダーを付与する
pub async fn apply_cors_headers(
    State(state): State<Arc<CorsState>>,
    request: Request,
    next: Next,
) -> Response {
    let headers = state.policy.headers_for(request.headers().get(ORIGIN));
    let mut response = next.run(request).await;
    response.headers_mut().extend(headers);
    response
}
