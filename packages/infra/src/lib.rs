//! # edgeblog インフラ層
//!
//! KV ストアとの接続・読み書きを担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! ストアが提供する操作は単一キーの get / put / delete と接頭辞による列挙、
//! そして「存在しない場合のみ書き込む」条件付き put のみ。
//! 複数キーにまたがるトランザクションは存在しない。
//!
//! ハンドラはストアをグローバルに参照せず、[`KvStore`] トレイトオブジェクトを
//! 注入される。テストではインメモリ実装に差し替える。
//!
//! ## 依存関係
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`kv`] - KV ストアのトレイトと接続 URL による実装の選択
//! - [`memory`] - インメモリ実装
//! - [`redis`] - Redis 実装
//! - [`repository`] - ユーザー・投稿レコードのリポジトリ
//! - [`error`] - インフラ層エラー定義
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use edgeblog_infra::{kv, repository::KvBlogPostRepository};
//!
//! let store = kv::open_store("redis://localhost:6379").await?;
//! let posts = KvBlogPostRepository::new(store);
//! ```

pub mod error;
pub mod kv;
pub mod memory;
pub mod redis;
pub mod repository;

pub use error::InfraError;
pub use kv::KvStore;
pub use memory::InMemoryKvStore;
pub use self::redis::RedisKvStore;
