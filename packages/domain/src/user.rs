//! # ユーザー
//!
//! 認証サービスが管理するユーザーレコード。
//!
//! ## ストア上の表現
//!
//! | キー | 値 |
//! |-----|-----|
//! | `{email}` | `{"userId", "email", "password", "username"}` (JSON) |
//!
//! メールアドレスごとに 1 レコード。サインアップで一度だけ作成され、
//! 更新・削除の経路は存在しない。パスワードは受け取った文字列をそのまま保存する。

use serde::{Deserialize, Serialize};

use crate::{DomainError, error::present};

/// ユーザーレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// 呼び出し側が採番した ID（検証しない）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id:  Option<String>,
    pub email:    String,
    pub password: String,
    pub username: String,
}

impl User {
    /// サインアップ入力からユーザーを作成する
    ///
    /// `email`, `password`, `username` のいずれかが未指定または空文字列の場合は
    /// [`DomainError::MissingFields`] を返す。`user_id` は検証しない。
    pub fn sign_up(
        user_id: Option<String>,
        email: Option<String>,
        password: Option<String>,
        username: Option<String>,
    ) -> Result<Self, DomainError> {
        match (present(email), present(password), present(username)) {
            (Some(email), Some(password), Some(username)) => Ok(Self {
                user_id,
                email,
                password,
                username,
            }),
            _ => Err(DomainError::MissingFields("email, password, username")),
        }
    }

    /// 保存されているパスワードと完全一致するか
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// パスワードを除いたプロフィールを返す
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id:  self.user_id.clone(),
            email:    self.email.clone(),
            username: self.username.clone(),
        }
    }
}

/// ログイン成功時に返すプロフィール
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id:  Option<String>,
    pub email:    String,
    pub username: String,
}

/// ログイン入力
///
/// `email` と `password` の両方が揃っていることを保証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email:    String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: Option<String>, password: Option<String>) -> Result<Self, DomainError> {
        match (present(email), present(password)) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            _ => Err(DomainError::MissingFields("email, password")),
        }
    }
}
