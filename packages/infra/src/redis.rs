//! # Redis KV ストア
//!
//! Redis を使う [`KvStore`] 実装。
//!
//! ## 設計方針
//!
//! - **ConnectionManager**: 自動再接続機能を持つ接続マネージャを使用し、
//!   リクエストごとに clone して共有する
//! - **条件付き書き込み**: `put_if_absent` は `SETNX` で実現する
//! - **列挙**: `KEYS` ではなく `SCAN` でカーソルを進める
//!
//! ## コマンド対応
//!
//! | 操作 | Redis コマンド |
//! |------|---------------|
//! | `get` | `GET` |
//! | `put` | `SET` |
//! | `put_if_absent` | `SETNX` |
//! | `delete` | `DEL` |
//! | `list` | `SCAN MATCH {prefix}*` |

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};

use crate::{InfraError, KvStore};

/// SCAN 1 回あたりの取得件数の目安
const SCAN_COUNT: usize = 100;

/// Redis 接続マネージャを作成する
///
/// # 引数
///
/// * `redis_url` - Redis 接続 URL
///   - 形式: `redis://[[username:]password@]host[:port][/database]`
///   - TLS: `rediss://` スキームで TLS 接続
pub async fn create_connection_manager(
    redis_url: &str,
) -> Result<ConnectionManager, redis::RedisError> {
    let client = Client::open(redis_url)?;
    ConnectionManager::new(client).await
}

/// Redis を使用した KV ストア
#[derive(Clone)]
pub struct RedisKvStore {
    conn: ConnectionManager,
}

impl RedisKvStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// 接続 URL から Redis KV ストアを作成する
    pub async fn connect(redis_url: &str) -> Result<Self, InfraError> {
        let conn = create_connection_manager(redis_url).await?;
        Ok(Self::new(conn))
    }
}

/// 接頭辞を SCAN の MATCH パターンに変換する
///
/// glob のメタ文字はエスケープし、接頭辞を文字どおりに一致させる。
fn scan_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, InfraError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), InfraError> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> Result<bool, InfraError> {
        let mut conn = self.conn.clone();
        let created: bool = conn.set_nx(key, value).await?;
        Ok(created)
    }

    async fn delete(&self, key: &str) -> Result<(), InfraError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, InfraError> {
        let pattern = scan_pattern(prefix);
        let mut conn = self.conn.clone();
        let mut found = Vec::new();

        let mut cursor = 0u64;
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await?;

            found.extend(keys);

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        // SCAN は同じキーを複数回返しうる
        found.sort();
        found.dedup();
        Ok(found)
    }
}
