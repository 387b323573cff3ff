//! # インフラ層エラー定義
//!
//! KV ストアとの通信と、ストア上の JSON ドキュメントの変換で発生するエラー。
//!
//! [`InfraError`] は種別（[`InfraErrorKind`]）に加えて、生成時点の [`SpanTrace`] を保持する。
//! 一覧・サイトマップで個別レコードをスキップする際のログに、どのリクエストの
//! どの処理で失敗したかを残すため。
//!
//! | 種別 | 発生箇所 |
//! |------|---------|
//! | `Redis` | Redis コマンドの実行、接続 |
//! | `Decode` | `get_json`（保存済みドキュメントが JSON として読めない） |
//! | `Encode` | `put_json` / `put_json_if_absent` |
//! | `UnsupportedStoreUrl` | `open_store` |
//! | `Unexpected` | その他 |

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    #[error("Redis エラー: {0}")]
    Redis(#[source] redis::RedisError),

    /// 保存済みドキュメントを読み込めない
    #[error("{key} の値を読み込めません: {source}")]
    Decode {
        key:    String,
        #[source]
        source: serde_json::Error,
    },

    /// 値を JSON に変換できない
    #[error("{key} に書き込む値を変換できません: {source}")]
    Encode {
        key:    String,
        #[source]
        source: serde_json::Error,
    },

    #[error("対応していないストア URL です: {0}")]
    UnsupportedStoreUrl(String),

    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    fn new(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    pub fn decode(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::new(InfraErrorKind::Decode {
            key: key.into(),
            source,
        })
    }

    pub fn encode(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::new(InfraErrorKind::Encode {
            key: key.into(),
            source,
        })
    }

    pub fn unsupported_store_url(url: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::UnsupportedStoreUrl(url.into()))
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::Unexpected(msg.into()))
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// Redis コマンドは `?` で変換する
impl From<redis::RedisError> for InfraError {
    fn from(source: redis::RedisError) -> Self {
        Self::new(InfraErrorKind::Redis(source))
    }
}
