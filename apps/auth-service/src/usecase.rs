//! # ユースケース層
//!
//! Auth Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラのテストでスタブに差し替えられるようトレイトを定義
//! - **依存性注入**: リポジトリを外部から注入
//! - **薄いハンドラ**: ハンドラは入出力の変換のみ行い、判定はユースケースに集約

pub mod auth;

use async_trait::async_trait;
pub use auth::{AuthUseCaseImpl, SignUpInput};
use edgeblog_domain::user::{User, UserProfile};

use crate::error::AuthError;

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// ユーザーを登録する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(User)`: 保存したユーザー
    /// - `Err(AuthError::MissingFields)`: email / password / username の欠落
    /// - `Err(AuthError::UserAlreadyExists)`: 同じメールアドレスが登録済み
    async fn sign_up(&self, input: SignUpInput) -> Result<User, AuthError>;

    /// メールアドレスとパスワードで認証する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(UserProfile)`: パスワードを除いたプロフィール
    /// - `Err(AuthError::UserNotFound)`: 未登録のメールアドレス
    /// - `Err(AuthError::InvalidCredentials)`: パスワード不一致
    async fn log_in(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<UserProfile, AuthError>;
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    async fn sign_up(&self, input: SignUpInput) -> Result<User, AuthError> {
        self.sign_up(input).await
    }

    async fn log_in(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<UserProfile, AuthError> {
        self.log_in(email, password).await
    }
}
