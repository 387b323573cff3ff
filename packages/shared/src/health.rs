//! # ヘルスチェック
//!
//! `GET /health` のレスポンス。ストアへの疎通は確認せず、プロセスが応答できることだけを示す。

use serde::Serialize;

/// `GET /health` のボディ
///
/// ```
/// use edgeblog_shared::HealthResponse;
///
/// let body = HealthResponse::healthy(env!("CARGO_PKG_VERSION"));
/// assert_eq!(body.status, "healthy");
/// ```
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status:  &'static str,
    /// サービスのクレートバージョン
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  "healthy",
            version: version.into(),
        }
    }
}
