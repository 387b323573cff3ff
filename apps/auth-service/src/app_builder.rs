//! # Router 組み立て
//!
//! 初期化済みの依存を受け取り、State → Router → レイヤーの順に組み立てる。
//! `main` と統合テストの両方から使う。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{any, get},
};
use edgeblog_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{AuthState, health_check, login, not_found, signup},
    middleware::{CorsState, apply_cors_headers, preflight},
};

/// Auth Service の Router を構築する
pub fn build_app(auth_state: Arc<AuthState>) -> Router {
    let cors_state = Arc::new(CorsState::default());

    // 認証エンドポイントはメソッドを区別せず、ボディの解析結果で応答する
    Router::new()
        .route("/auth/signup", any(signup))
        .route("/auth/login", any(login))
        .route_layer(from_fn_with_state(cors_state.clone(), apply_cors_headers))
        .route("/health", get(health_check))
        .fallback(not_found)
        .with_state(auth_state)
        .layer(from_fn_with_state(cors_state, preflight))
        // レイヤー順序: 下に書いたものが外側
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
