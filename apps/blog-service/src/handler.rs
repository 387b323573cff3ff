//! # HTTP リクエストハンドラ
//!
//! - `post`: 投稿の一覧・作成・取得・置換・削除
//! - `sitemap`: サイトマップ XML
//! - `health`: ヘルスチェック
//!
//! 未定義パスには利用可能なエンドポイントの一覧を付けた 404 を返す。

pub mod health;
pub mod post;
pub mod sitemap;

use axum::{Json, http::StatusCode, http::Uri, response::IntoResponse};
pub use health::health_check;
pub use post::{
    BlogState,
    create_post,
    delete_post,
    get_post,
    list_method_not_allowed,
    list_posts,
    post_method_not_allowed,
    put_post,
};
use serde::Serialize;
pub use sitemap::sitemap;

const AVAILABLE_ENDPOINTS: [&str; 3] = ["/api/blog", "/api/blog/{slug}", "/sitemap.xml"];

/// 未定義パスの 404 ボディ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotFoundBody<'a> {
    error:               &'static str,
    path:                &'a str,
    available_endpoints: [&'static str; 3],
}

/// 未定義パスへのフォールバック
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error:               "Not found",
            path:                uri.path(),
            available_endpoints: AVAILABLE_ENDPOINTS,
        }),
    )
        .into_response()
}
