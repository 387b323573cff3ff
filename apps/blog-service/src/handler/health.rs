//! # ヘルスチェックハンドラ

use axum::Json;
use edgeblog_shared::HealthResponse;

/// Blog Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
