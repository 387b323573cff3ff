//! # 認証ユースケース
//!
//! サインアップとログインの判定を行う。
//!
//! パスワードは受け取った文字列をそのまま保存し、ログイン時も完全一致で比較する。

use std::sync::Arc;

use edgeblog_domain::{
    DomainError,
    user::{LoginCredentials, User, UserProfile},
};
use edgeblog_infra::repository::UserRepository;

use crate::error::AuthError;

const MISSING_SIGNUP_FIELDS: &str = "Missing required fields";
const MISSING_LOGIN_FIELDS: &str = "Missing email or password";

/// サインアップ入力
#[derive(Debug, Clone, Default)]
pub struct SignUpInput {
    pub user_id:  Option<String>,
    pub email:    Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
}

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
}

impl AuthUseCaseImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// ユーザーを登録する
    ///
    /// 存在確認と書き込みは `insert_if_absent` の 1 操作で行うため、
    /// 同じメールアドレスの同時サインアップでも保存されるのは 1 件のみ。
    pub async fn sign_up(&self, input: SignUpInput) -> Result<User, AuthError> {
        let user = User::sign_up(input.user_id, input.email, input.password, input.username)
            .map_err(|_: DomainError| AuthError::MissingFields(MISSING_SIGNUP_FIELDS))?;

        if !self.user_repository.insert_if_absent(&user).await? {
            tracing::debug!(email = %user.email, "登録済みのメールアドレスです");
            return Err(AuthError::UserAlreadyExists);
        }

        tracing::info!(username = %user.username, "ユーザーを登録しました");
        Ok(user)
    }

    /// メールアドレスとパスワードで認証する
    pub async fn log_in(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<UserProfile, AuthError> {
        let credentials = LoginCredentials::new(email, password)
            .map_err(|_| AuthError::MissingFields(MISSING_LOGIN_FIELDS))?;

        let user = self
            .user_repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.password_matches(&credentials.password) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.profile())
    }
}
