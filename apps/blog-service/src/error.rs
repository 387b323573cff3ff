//! # Blog Service エラー定義
//!
//! Blog Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! エラーボディの文言はクライアントが表示・判定に使う API 契約のため英語のまま返す。
//!
//! | エラー | ステータス | `error` |
//! |-------|-----------|---------|
//! | `MissingPathSlug` | 400 | `Slug is required` |
//! | `MissingSlug` | 400 | `Missing slug` |
//! | `MissingFields` | 400 | `Missing required fields` |
//! | `PostAlreadyExists` | 409 | `Post already exists` |
//! | `PostNotFound` | 404 | `Post not found`（`slug` 付き） |
//! | `Unauthorized` | 401 | `Unauthorized` |
//! | `MethodNotAllowed` | 405 | `Method not allowed` |
//! | `StoreUnconfigured` | 500 | `Blog store not configured` |
//! | `Failed` | 500 | 処理グループごとの文言（`details` に原因） |

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use edgeblog_domain::DomainError;
use edgeblog_infra::InfraError;
use edgeblog_shared::ErrorBody;
use serde::Serialize;
use thiserror::Error;

/// 内部エラーが発生した処理グループ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureScope {
    /// 一覧取得・作成（`/api/blog`）
    PostList,
    /// 個別投稿の取得・置換・削除（`/api/blog/{slug}`）
    Post,
    /// サイトマップ生成
    Sitemap,
}

impl FailureScope {
    fn title(self) -> &'static str {
        match self {
            FailureScope::PostList => "Failed to retrieve blog posts",
            FailureScope::Post => "Failed to process blog post",
            FailureScope::Sitemap => "Sitemap generation failed",
        }
    }

    fn message(self) -> &'static str {
        match self {
            FailureScope::PostList => "An error occurred while fetching blog posts",
            FailureScope::Post => "An error occurred while processing the blog post",
            FailureScope::Sitemap => "An error occurred while generating the sitemap",
        }
    }
}

/// 内部エラーの原因
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("{0}")]
    Store(#[from] InfraError),

    /// リクエストボディが JSON として解釈できない
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    /// サイトマップ XML を書き出せない
    #[error("{0}")]
    Render(#[from] quick_xml::errors::serialize::SeError),
}

/// Blog Service で発生するエラー
#[derive(Debug, Error)]
pub enum BlogError {
    /// パスにスラッグがない（`/api/blog/`）
    #[error("Slug is required")]
    MissingPathSlug,

    /// 作成リクエストにスラッグがない
    #[error("Missing slug")]
    MissingSlug,

    /// タイトルまたは本文がない
    #[error("Missing required fields")]
    MissingFields,

    #[error("Post already exists")]
    PostAlreadyExists,

    #[error("Post not found")]
    PostNotFound { slug: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// KV ストアが設定されていない
    #[error("Blog store not configured")]
    StoreUnconfigured,

    /// ストアエラーや不正な JSON など、処理中の予期しないエラー
    #[error("{}: {cause}", .scope.title())]
    Failed {
        scope: FailureScope,
        #[source]
        cause: FailureCause,
    },
}

impl BlogError {
    /// 一覧取得・作成の処理中に発生したエラー
    pub fn list_failure(cause: impl Into<FailureCause>) -> Self {
        Self::Failed {
            scope: FailureScope::PostList,
            cause: cause.into(),
        }
    }

    /// 個別投稿の処理中に発生したエラー
    pub fn post_failure(cause: impl Into<FailureCause>) -> Self {
        Self::Failed {
            scope: FailureScope::Post,
            cause: cause.into(),
        }
    }

    /// サイトマップ生成中に発生したエラー
    pub fn sitemap_failure(cause: impl Into<FailureCause>) -> Self {
        Self::Failed {
            scope: FailureScope::Sitemap,
            cause: cause.into(),
        }
    }

    /// 失敗理由の短い説明
    ///
    /// サイトマップのプレーンテキストエラーに使う。
    pub fn reason(&self) -> String {
        match self {
            BlogError::Failed { cause, .. } => cause.to_string(),
            other => other.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            BlogError::MissingPathSlug | BlogError::MissingSlug | BlogError::MissingFields => {
                StatusCode::BAD_REQUEST
            }
            BlogError::PostAlreadyExists => StatusCode::CONFLICT,
            BlogError::PostNotFound { .. } => StatusCode::NOT_FOUND,
            BlogError::Unauthorized => StatusCode::UNAUTHORIZED,
            BlogError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            BlogError::StoreUnconfigured | BlogError::Failed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DomainError> for BlogError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingSlug => BlogError::MissingSlug,
            DomainError::MissingFields(_) => BlogError::MissingFields,
        }
    }
}

/// 投稿が見つからない場合のボディ
#[derive(Debug, Serialize)]
struct PostNotFoundBody<'a> {
    error: &'static str,
    slug:  &'a str,
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            BlogError::PostNotFound { slug } => {
                return (
                    status,
                    Json(PostNotFoundBody {
                        error: "Post not found",
                        slug:  slug.as_str(),
                    }),
                )
                    .into_response();
            }
            BlogError::MissingSlug => {
                ErrorBody::with_message("Missing slug", "Slug is required for creating a new post")
            }
            BlogError::MissingFields => {
                ErrorBody::with_message("Missing required fields", "Title and content are required")
            }
            BlogError::PostAlreadyExists => ErrorBody::with_message(
                "Post already exists",
                "A post with this slug already exists",
            ),
            BlogError::StoreUnconfigured => {
                tracing::error!("KV ストアが設定されていません");
                ErrorBody::with_message(
                    "Blog store not configured",
                    "The blog storage system is not properly configured",
                )
            }
            BlogError::Failed { scope, cause } => {
                match cause {
                    FailureCause::Store(e) => {
                        tracing::error!(error = %e, span_trace = %e.span_trace(), "ストアエラー");
                    }
                    FailureCause::MalformedBody(e) => {
                        tracing::warn!(error = %e, "リクエストボディの解析に失敗しました");
                    }
                    FailureCause::Render(e) => {
                        tracing::error!(error = %e, "XML の書き出しに失敗しました");
                    }
                }
                ErrorBody::with_message(scope.title(), scope.message()).with_details(cause.to_string())
            }
            other => ErrorBody::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// ハンドラ内の panic を 500 レスポンスに変換する
///
/// `CatchPanicLayer::custom` に渡す。個別のエラー処理で変換されなかった失敗の最終受け皿。
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown error".to_string()
    };

    tracing::error!(error.message = %message, "ハンドラで panic が発生しました");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::with_message("Internal Server Error", message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(BlogError::MissingPathSlug, StatusCode::BAD_REQUEST, serde_json::json!({ "error": "Slug is required" }))]
    #[case(BlogError::Unauthorized, StatusCode::UNAUTHORIZED, serde_json::json!({ "error": "Unauthorized" }))]
    #[case(BlogError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED, serde_json::json!({ "error": "Method not allowed" }))]
    #[case(
        BlogError::PostNotFound { slug: "hello".to_string() },
        StatusCode::NOT_FOUND,
        serde_json::json!({ "error": "Post not found", "slug": "hello" })
    )]
    #[case(
        BlogError::StoreUnconfigured,
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::json!({
            "error": "Blog store not configured",
            "message": "The blog storage system is not properly configured"
        })
    )]
    #[tokio::test]
    async fn test_エラー種別ごとのレスポンス(
        #[case] error: BlogError,
        #[case] expected_status: StatusCode,
        #[case] expected_body: serde_json::Value,
    ) {
        let response = error.into_response();

        assert_eq!(response.status(), expected_status);
        assert_eq!(body_json(response).await, expected_body);
    }

    #[tokio::test]
    async fn test_不正なjsonは処理グループの文言と解析エラーの詳細を返す() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let details = parse_error.to_string();

        let response = BlogError::list_failure(parse_error).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "error": "Failed to retrieve blog posts",
                "message": "An error occurred while fetching blog posts",
                "details": details
            })
        );
    }

    #[test]
    fn test_reasonは原因のメッセージを返す() {
        let error = BlogError::sitemap_failure(InfraError::unexpected("boom"));

        assert_eq!(error.reason(), "予期しないエラー: boom");
        assert_eq!(BlogError::StoreUnconfigured.reason(), "Blog store not configured");
    }

    #[test]
    fn test_ドメインエラーの変換() {
        assert!(matches!(
            BlogError::from(DomainError::MissingSlug),
            BlogError::MissingSlug
        ));
        assert!(matches!(
            BlogError::from(DomainError::MissingFields("title, content")),
            BlogError::MissingFields
        ));
    }

    #[tokio::test]
    async fn test_panicはinternal_server_errorに変換する() {
        let response = panic_response(Box::new("boom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Internal Server Error", "message": "boom" })
        );
    }
}
