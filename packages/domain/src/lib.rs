//! # edgeblog ドメイン層
//!
//! 認証サービスとブログサービスが扱うレコードと、その生成・補完ルールを定義する。
//!
//! ## 設計方針
//!
//! - **ストア非依存**: KV ストアへの読み書きはインフラ層に任せ、
//!   このクレートはレコードの形とバリデーションだけを持つ
//! - **欠損に寛容な読み取り**: ストア上のドキュメントは欠損フィールドを許容し、
//!   読み取り時にデフォルト値で補完する
//! - **時刻の注入**: `Utc::now()` を直接呼ばず [`clock::Clock`] を受け取る
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//!   ↘      ↓
//!      shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`blog_post`] - ブログ投稿レコード、スラッグ、要約
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメインエラー
//! - [`timestamp`] - タイムスタンプのシリアライズ形式
//! - [`user`] - ユーザーレコード

pub mod blog_post;
pub mod clock;
pub mod error;
pub mod timestamp;
pub mod user;

pub use error::DomainError;
