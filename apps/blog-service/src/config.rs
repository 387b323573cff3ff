//! # Blog Service 設定
//!
//! 環境変数から Blog Service サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `BLOG_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `BLOG_PORT` | **Yes** | ポート番号 |
//! | `BLOG_STORE_URL` | No | KV ストア接続 URL。未設定の場合、投稿 API は 500 を返す |
//! | `BLOG_API_KEY` | **Yes** | 書き込み系リクエストの `Authorization` と照合するキー |
//! | `BLOG_ALLOWED_ORIGINS` | No | カンマ区切りの Origin パターン（正規表現）。デフォルト: `http://localhost:*` |
//! | `SITE_BASE_URL` | No | サイトマップの URL 基点。デフォルト: `http://localhost:3000` |
//! | `BLOG_SEED_SAMPLE_POST` | No | `true` で起動時にサンプル投稿を投入する |

use std::env;

use edgeblog_shared::cors::OriginAllowList;
use thiserror::Error;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:*";
const DEFAULT_SITE_BASE_URL: &str = "http://localhost:3000";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Blog Service サーバーの設定
#[derive(Debug, Clone)]
pub struct BlogConfig {
    pub host:             String,
    pub port:             u16,
    /// KV ストア接続 URL（未設定ならストアなしで起動する）
    pub store_url:        Option<String>,
    pub api_key:          String,
    pub allowed_origins:  OriginAllowList,
    /// 末尾の `/` を除いたサイトの URL
    pub site_base_url:    String,
    pub seed_sample_post: bool,
}

impl BlogConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("BLOG_PORT").ok_or(ConfigError::Missing("BLOG_PORT"))?;
        let port = port.parse().map_err(|_| ConfigError::Invalid {
            name:  "BLOG_PORT",
            value: port,
        })?;

        let api_key = lookup("BLOG_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing("BLOG_API_KEY"))?;

        let origins =
            lookup("BLOG_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string());
        let allowed_origins =
            OriginAllowList::parse(origins.split(',')).map_err(|_| ConfigError::Invalid {
                name:  "BLOG_ALLOWED_ORIGINS",
                value: origins.clone(),
            })?;

        let site_base_url = lookup("SITE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_SITE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let seed_sample_post = match lookup("BLOG_SEED_SAMPLE_POST").as_deref() {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name:  "BLOG_SEED_SAMPLE_POST",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            host: lookup("BLOG_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            store_url: lookup("BLOG_STORE_URL").filter(|url| !url.is_empty()),
            api_key,
            allowed_origins,
            site_base_url,
            seed_sample_post,
        })
    }
}
