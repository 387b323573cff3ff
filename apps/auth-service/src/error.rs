//! # Auth Service エラー定義
//!
//! Auth Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! エラーメッセージはクライアントが表示・判定に使う API 契約のため英語のまま返す。
//!
//! | エラー | ステータス | `error` |
//! |-------|-----------|---------|
//! | `MissingFields` | 400 | 操作ごとのメッセージ |
//! | `UserAlreadyExists` | 409 | `User already exists` |
//! | `UserNotFound` | 404 | `User not found` |
//! | `InvalidCredentials` | 401 | `Invalid credentials` |
//! | `MalformedBody` / `Store` | 500 | 元のエラーメッセージ |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use edgeblog_infra::InfraError;
use edgeblog_shared::ErrorBody;
use thiserror::Error;

/// Auth Service で発生するエラー
#[derive(Debug, Error)]
pub enum AuthError {
    /// 必須フィールドの欠落
    #[error("{0}")]
    MissingFields(&'static str),

    /// 同じメールアドレスのユーザーが既に存在する
    #[error("User already exists")]
    UserAlreadyExists,

    /// ユーザーが存在しない
    #[error("User not found")]
    UserNotFound,

    /// パスワード不一致
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// リクエストボディが JSON として解釈できない
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    /// ストアエラー
    #[error("{0}")]
    Store(#[from] InfraError),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MalformedBody(_) | AuthError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::Store(e) => {
                tracing::error!(error = %e, span_trace = %e.span_trace(), "ストアエラー");
            }
            AuthError::MalformedBody(e) => {
                tracing::warn!(error = %e, "リクエストボディの解析に失敗しました");
            }
            _ => {}
        }

        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
