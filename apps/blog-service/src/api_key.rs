//! # API キー検証
//!
//! 書き込み系リクエスト（作成・置換・削除）は `Authorization` ヘッダーの値が
//! 設定された API キーと完全一致する必要がある。`Bearer` などのスキームは解釈しない。

use axum::http::{HeaderMap, header::AUTHORIZATION};

use crate::error::BlogError;

/// 静的 API キー
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// `Authorization` ヘッダーを検証する
    ///
    /// ヘッダーがない、または値が一致しない場合は [`BlogError::Unauthorized`]。
    pub fn verify(&self, headers: &HeaderMap) -> Result<(), BlogError> {
        let provided = headers.get(AUTHORIZATION).map(|value| value.as_bytes());
        if provided == Some(self.0.as_bytes()) {
            return Ok(());
        }

        tracing::info!("API キーが一致しないため拒否しました");
        Err(BlogError::Unauthorized)
    }
}

// キーをログに出さない
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
