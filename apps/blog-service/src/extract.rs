//! # スラッグ抽出
//!
//! `/api/blog/{slug}` のパスからスラッグを取り出すエクストラクタ。
//!
//! スラッグは `/` で区切った 4 番目の要素（`/api/blog/a/b` なら `a`）。
//! パーセントエンコーディングはデコードせず、パスの表記のまま扱う。
//! 空の場合は [`BlogError::MissingPathSlug`] で拒否する。

use axum::{extract::FromRequestParts, http::request::Parts};
use edgeblog_domain::blog_post::Slug;

use crate::error::BlogError;

/// パスから取り出したスラッグ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSlug(pub Slug);

impl PathSlug {
    fn from_path(path: &str) -> Result<Self, BlogError> {
        let segment = path.split('/').nth(3).unwrap_or_default();
        Slug::new(segment)
            .map(Self)
            .map_err(|_| BlogError::MissingPathSlug)
    }
}

impl<S> FromRequestParts<S> for PathSlug
where
    S: Send + Sync,
{
    type Rejection = BlogError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_path(parts.uri.path())
    }
}
