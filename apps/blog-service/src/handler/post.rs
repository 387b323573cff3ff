//! # ブログ投稿ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/blog` - 投稿の要約一覧（新しい順）
//! - `POST /api/blog` - 投稿の作成（API キー必須）
//! - `GET /api/blog/{slug}` - 投稿の取得
//! - `PUT /api/blog/{slug}` - 投稿の置換（API キー必須）
//! - `DELETE /api/blog/{slug}` - 投稿の削除（API キー必須）
//!
//! ## 判定順序
//!
//! 1. ストアが設定されているか（500）
//! 2. 書き込み系なら API キー（401）
//! 3. メソッド（405）、本文の解析、ユースケース
//!
//! リクエストボディは `Json` エクストラクタを使わずバイト列から解析する。
//! 不正な JSON は処理グループごとの 500 として返す。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use edgeblog_domain::blog_post::PostDraft;
use serde::Serialize;

use crate::{api_key::ApiKey, error::BlogError, extract::PathSlug, usecase::BlogUseCase};

/// ブログハンドラの共有状態
pub struct BlogState {
    pub usecase: Arc<dyn BlogUseCase>,
    pub api_key: ApiKey,
}

// --- レスポンス型 ---

/// 作成レスポンス
#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub success: bool,
    pub slug:    String,
    pub message: &'static str,
}

/// 置換・削除レスポンス
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MutationResponse {
    fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

// --- /api/blog ---

/// GET /api/blog
pub async fn list_posts(
    State(state): State<Arc<BlogState>>,
) -> Result<impl IntoResponse, BlogError> {
    let posts = state.usecase.list_posts().await?;
    tracing::debug!(count = posts.len(), "投稿一覧を返します");
    Ok(Json(posts))
}

/// POST /api/blog
pub async fn create_post(
    State(state): State<Arc<BlogState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, BlogError> {
    state.usecase.ensure_store()?;
    state.api_key.verify(&headers)?;

    let draft: PostDraft = serde_json::from_slice(&body).map_err(BlogError::list_failure)?;
    let slug = state.usecase.create_post(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            success: true,
            slug:    slug.to_string(),
            message: "Post created successfully",
        }),
    ))
}

/// /api/blog への GET・POST 以外のメソッド
///
/// API キーは検証しない。
pub async fn list_method_not_allowed(State(state): State<Arc<BlogState>>) -> BlogError {
    match state.usecase.ensure_store() {
        Ok(()) => BlogError::MethodNotAllowed,
        Err(e) => e,
    }
}

// --- /api/blog/{slug} ---

/// GET /api/blog/{slug}
pub async fn get_post(
    State(state): State<Arc<BlogState>>,
    PathSlug(slug): PathSlug,
) -> Result<impl IntoResponse, BlogError> {
    let post = state.usecase.get_post(&slug).await?;
    Ok(Json(post))
}

/// PUT /api/blog/{slug}
pub async fn put_post(
    State(state): State<Arc<BlogState>>,
    PathSlug(slug): PathSlug,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, BlogError> {
    state.usecase.ensure_store()?;
    state.api_key.verify(&headers)?;

    let draft: PostDraft = serde_json::from_slice(&body).map_err(BlogError::post_failure)?;
    state.usecase.replace_post(slug, draft).await?;

    Ok(Json(MutationResponse::ok("Post updated successfully")))
}

/// DELETE /api/blog/{slug}
pub async fn delete_post(
    State(state): State<Arc<BlogState>>,
    PathSlug(slug): PathSlug,
    headers: HeaderMap,
) -> Result<impl IntoResponse, BlogError> {
    state.usecase.ensure_store()?;
    state.api_key.verify(&headers)?;

    state.usecase.delete_post(&slug).await?;

    Ok(Json(MutationResponse::ok("Post deleted successfully")))
}

/// /api/blog/{slug} への GET・PUT・DELETE 以外のメソッド
///
/// メソッドを判定する前に API キーを検証する。
pub async fn post_method_not_allowed(
    State(state): State<Arc<BlogState>>,
    _slug: PathSlug,
    headers: HeaderMap,
) -> BlogError {
    let checked = state
        .usecase
        .ensure_store()
        .and_then(|()| state.api_key.verify(&headers));
    match checked {
        Ok(()) => BlogError::MethodNotAllowed,
        Err(e) => e,
    }
}
