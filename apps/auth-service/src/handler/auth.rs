//! # 認証ハンドラ
//!
//! ## エンドポイント
//!
//! - `/auth/signup` - ユーザー登録
//! - `/auth/login` - ログイン
//!
//! どちらもメソッドを区別しない（OPTIONS はプリフライトとして先に処理される）。
//!
//! リクエストボディは `Json` エクストラクタを使わず、バイト列から自前で解析する。
//! 不正な JSON は 400 ではなく 500 `{error: <parser message>}` として返すため。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AuthError,
    usecase::{AuthUseCase, SignUpInput},
};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// サインアップリクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email:    Option<String>,
    pub password: Option<String>,
    pub user_id:  Option<String>,
    pub username: Option<String>,
}

/// サインアップレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id:  Option<String>,
    pub username: String,
    pub message:  &'static str,
}

/// ログインリクエスト
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email:    Option<String>,
    pub password: Option<String>,
}

// --- ハンドラ ---

/// /auth/signup
pub async fn signup(
    State(state): State<Arc<AuthState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AuthError> {
    let req: SignupRequest = serde_json::from_slice(&body)?;

    let user = state
        .usecase
        .sign_up(SignUpInput {
            user_id:  req.user_id,
            email:    req.email,
            password: req.password,
            username: req.username,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id:  user.user_id,
            username: user.username,
            message:  "Account created successfully",
        }),
    ))
}

/// /auth/login
///
/// 成功時はパスワードを除いたプロフィールを返す。
pub async fn login(
    State(state): State<Arc<AuthState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AuthError> {
    let req: LoginRequest = serde_json::from_slice(&body)?;

    let profile = state.usecase.log_in(req.email, req.password).await?;

    Ok(Json(profile))
}

/// 未定義パスへのフォールバック
///
/// JSON ではなくプレーンテキストで返す。CORS ヘッダーは付与しない。
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
        routing::post,
    };
    use edgeblog_domain::user::{User, UserProfile};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    // テスト用スタブ: 入力をそのまま受け入れる
    struct StubAuthUseCase;

    #[async_trait]
    impl AuthUseCase for StubAuthUseCase {
        async fn sign_up(&self, input: SignUpInput) -> Result<User, AuthError> {
            Ok(User {
                user_id:  input.user_id,
                email:    input.email.unwrap_or_default(),
                password: input.password.unwrap_or_default(),
                username: input.username.unwrap_or_default(),
            })
        }

        async fn log_in(
            &self,
            email: Option<String>,
            _password: Option<String>,
        ) -> Result<UserProfile, AuthError> {
            Ok(UserProfile {
                user_id:  Some("u-1".to_string()),
                email:    email.unwrap_or_default(),
                username: "alice".to_string(),
            })
        }
    }

    fn create_test_app() -> Router {
        let state = Arc::new(AuthState {
            usecase: Arc::new(StubAuthUseCase),
        });
        Router::new()
            .route("/auth/signup", post(signup))
            .route("/auth/login", post(login))
            .with_state(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_signup_201とuser_idとusernameを返す() {
        // Given
        let sut = create_test_app();
        let request = post_json(
            "/auth/signup",
            r#"{"email":"a@example.com","password":"pw","userId":"u-1","username":"alice"}"#,
        );

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "userId": "u-1",
                "username": "alice",
                "message": "Account created successfully"
            })
        );
    }

    #[tokio::test]
    async fn test_signup_不正なjsonは500で解析エラーを返す() {
        // Given
        let sut = create_test_app();
        let request = post_json("/auth/signup", "{not json");

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn test_login_プロフィールを返しパスワードを含まない() {
        // Given
        let sut = create_test_app();
        let request = post_json(
            "/auth/login",
            r#"{"email":"a@example.com","password":"pw"}"#,
        );

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "userId": "u-1",
                "email": "a@example.com",
                "username": "alice"
            })
        );
    }
}
