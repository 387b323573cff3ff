//! # Auth Service 設定
//!
//! 環境変数から Auth Service サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Auth Service サーバーの設定
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// バインドアドレス
    pub host:      String,
    /// ポート番号
    pub port:      u16,
    /// KV ストア接続 URL（`redis://`, `rediss://`, `memory://`）
    pub store_url: String,
}

impl AuthConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意のルックアップ関数から設定を読み込む
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("AUTH_PORT").ok_or(ConfigError::Missing("AUTH_PORT"))?;
        let port = port.parse().map_err(|_| ConfigError::Invalid {
            name:  "AUTH_PORT",
            value: port,
        })?;

        Ok(Self {
            host: lookup("AUTH_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            store_url: lookup("AUTH_STORE_URL").ok_or(ConfigError::Missing("AUTH_STORE_URL"))?,
        })
    }
}
