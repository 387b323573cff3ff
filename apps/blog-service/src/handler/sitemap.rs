//! # サイトマップハンドラ
//!
//! - `GET /sitemap.xml`
//!
//! 失敗時は JSON ではなくプレーンテキスト（`Sitemap generation failed: ...`）で 500 を返す。

use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::BlogState;
use crate::error::BlogError;

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<Arc<BlogState>>) -> Response {
    match state.usecase.sitemap().await {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
        Err(e) => failure_response(&e),
    }
}

fn failure_response(error: &BlogError) -> Response {
    match error {
        BlogError::Failed { .. } => {
            tracing::error!(error = %error, "サイトマップの生成に失敗しました");
        }
        _ => tracing::warn!(error = %error, "サイトマップを生成できません"),
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Sitemap generation failed: {}", error.reason()),
    )
        .into_response()
}
