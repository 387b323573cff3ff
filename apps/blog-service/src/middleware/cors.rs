//! # CORS ミドルウェア
//!
//! Blog Service はすべてのレスポンス（404、500 を含む）に CORS ヘッダーを付与する。
//!
//! | ヘッダー | 値 |
//! |---------|-----|
//! | `Access-Control-Allow-Origin` | 許可リストに一致した Origin、それ以外は `*` |
//! | `Access-Control-Allow-Methods` | `GET, POST, PUT, DELETE, OPTIONS` |
//! | `Access-Control-Allow-Headers` | `Content-Type, Authorization` |
//! | `Access-Control-Allow-Credentials` | `true` |
//!
//! `OPTIONS` はパスに関係なくボディなしの 200 で応答する。

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode, header::ORIGIN},
    middleware::Next,
    response::{IntoResponse, Response},
};
use edgeblog_shared::cors::{AllowOrigin, CorsPolicy, OriginAllowList};

/// CORS ミドルウェアの状態
#[derive(Debug, Clone)]
pub struct CorsState {
    pub policy: CorsPolicy,
}

impl CorsState {
    pub fn new(allowed_origins: OriginAllowList) -> Self {
        Self {
            policy: CorsPolicy::new(
                AllowOrigin::List(allowed_origins),
                "GET, POST, PUT, DELETE, OPTIONS",
                "Content-Type, Authorization",
            )
            .with_credentials(),
        }
    }
}

/// プリフライトに応答し、それ以外のレスポンスに CORS ヘッダーを付与する
pub async fn handle_cors(
    State(state): State<Arc<CorsState>>,
    request: Request,
    next: Next,
) -> Response {
    let headers = state.policy.headers_for(request.headers().get(ORIGIN));

    if request.method() == Method::OPTIONS {
        return (StatusCode::OK, headers).into_response();
    }

    let mut response = next.run(request).await;
    response.headers_mut().extend(headers);
    response
}
