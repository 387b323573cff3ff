//! # KV ストア
//!
//! サービスが利用する KV ストアの抽象化。
//!
//! ## 提供する操作
//!
//! | 操作 | 意味 |
//! |------|------|
//! | `get` | キーの値を取得（なければ `None`） |
//! | `put` | キーに値を書き込む（上書き） |
//! | `put_if_absent` | キーが存在しない場合のみ書き込む |
//! | `delete` | キーを削除（存在しなくても成功） |
//! | `list` | 接頭辞に一致するキーを列挙 |
//!
//! 各操作は単一キーについてアトミックに実行される。
//! 一意性が必要な作成（サインアップ、投稿作成）は `put_if_absent` を使い、
//! 「存在確認 → 書き込み」の間に割り込まれる競合を避ける。
//!
//! ## 接続 URL
//!
//! [`open_store`] は URL のスキームで実装を選択する:
//!
//! | スキーム | 実装 |
//! |---------|------|
//! | `redis://`, `rediss://` | [`RedisKvStore`] |
//! | `memory://` | [`InMemoryKvStore`] |

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::{InMemoryKvStore, InfraError, RedisKvStore};

/// KV ストアトレイト
#[async_trait]
pub trait KvStore: Send + Sync {
    /// キーの値を取得する
    async fn get(&self, key: &str) -> Result<Option<String>, InfraError>;

    /// キーに値を書き込む（既存値は上書きする）
    async fn put(&self, key: &str, value: &str) -> Result<(), InfraError>;

    /// キーが存在しない場合のみ書き込む
    ///
    /// # 戻り値
    ///
    /// 書き込んだ場合は `true`、既にキーが存在した場合は `false`
    async fn put_if_absent(&self, key: &str, value: &str) -> Result<bool, InfraError>;

    /// キーを削除する
    ///
    /// 存在しないキーを削除しても成功とする。
    async fn delete(&self, key: &str) -> Result<(), InfraError>;

    /// 接頭辞に一致するキーを辞書順で列挙する
    async fn list(&self, prefix: &str) -> Result<Vec<String>, InfraError>;
}

/// キーの値を JSON として取得する
pub async fn get_json<T>(store: &dyn KvStore, key: &str) -> Result<Option<T>, InfraError>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| InfraError::decode(key, e)),
        None => Ok(None),
    }
}

/// 値を JSON にシリアライズして書き込む
pub async fn put_json<T>(store: &dyn KvStore, key: &str, value: &T) -> Result<(), InfraError>
where
    T: Serialize + Sync,
{
    let json = serde_json::to_string(value).map_err(|e| InfraError::encode(key, e))?;
    store.put(key, &json).await
}

/// 値を JSON にシリアライズし、キーが存在しない場合のみ書き込む
pub async fn put_json_if_absent<T>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<bool, InfraError>
where
    T: Serialize + Sync,
{
    let json = serde_json::to_string(value).map_err(|e| InfraError::encode(key, e))?;
    store.put_if_absent(key, &json).await
}

/// 接続 URL から KV ストアを開く
pub async fn open_store(url: &str) -> Result<Arc<dyn KvStore>, InfraError> {
    if url.starts_with("memory://") {
        tracing::info!("インメモリ KV ストアを使用します");
        return Ok(Arc::new(InMemoryKvStore::new()));
    }

    if url.starts_with("redis://") || url.starts_with("rediss://") {
        let store = RedisKvStore::connect(url).await?;
        tracing::info!("Redis KV ストアに接続しました");
        return Ok(Arc::new(store));
    }

    Err(InfraError::unsupported_store_url(url))
}
