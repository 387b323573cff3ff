//! # edgeblog 共有ユーティリティ
//!
//! 認証サービスとブログサービスで共通して使うユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - HTTP スタックに依存する部分は feature で分離する
//!   - `observability`: トレーシング初期化、Canonical Log Line
//!   - `cors`: CORS ヘッダーの組み立て

#[cfg(feature = "observability")]
pub mod canonical_log;
#[cfg(feature = "cors")]
pub mod cors;
pub mod error_body;
pub mod health;
pub mod observability;

pub use error_body::ErrorBody;
pub use health::HealthResponse;
