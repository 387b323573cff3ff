//! # リポジトリ実装
//!
//! KV ストア上のレコードを型付きで読み書きするリポジトリ。
//!
//! ## 設計方針
//!
//! - **ストア抽象化**: [`KvStore`](crate::KvStore) トレイト経由でアクセスし、
//!   Redis とインメモリの差を隠す
//! - **キー設計の集約**: キーの組み立てはリポジトリ内に閉じ込める
//! - **テスタビリティ**: トレイト経由でスタブに差し替え可能

pub mod blog_post_repository;
pub mod user_repository;

pub use blog_post_repository::{BlogPostRepository, KvBlogPostRepository};
pub use user_repository::{KvUserRepository, UserRepository};
