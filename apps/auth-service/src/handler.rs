//! # HTTP リクエストハンドラ
//!
//! - `auth`: サインアップ、ログイン
//! - `health`: ヘルスチェック

pub mod auth;
pub mod health;

pub use auth::{AuthState, login, not_found, signup};
pub use health::health_check;
