//! # インメモリ KV ストア
//!
//! プロセス内の `BTreeMap` を使う [`KvStore`] 実装。
//! ローカル起動（`memory://`）とテストで使用する。プロセス終了で内容は失われる。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{InfraError, KvStore};

/// インメモリ KV ストア
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されているキーの数（テスト用）
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// 空かどうか（テスト用）
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, InfraError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), InfraError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> Result<bool, InfraError> {
        // 書き込みロックを保持したまま存在確認と挿入を行う
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<(), InfraError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, InfraError> {
        Ok(self
            .entries
            .read()
            .await
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_存在しないキーはnoneを返す() {
        let store = InMemoryKvStore::new();

        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_putは上書きする() {
        let store = InMemoryKvStore::new();

        store.put("k", "1").await.unwrap();
        store.put("k", "2").await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some("2".to_string()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_deleteは存在しないキーでも成功する() {
        let store = InMemoryKvStore::new();
        store.put("k", "v").await.unwrap();

        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_listは接頭辞に一致するキーのみ辞書順で返す() {
        let store = InMemoryKvStore::new();
        for key in ["post:b", "user@example.com", "post:a", "posts", "post:c"] {
            store.put(key, "{}").await.unwrap();
        }

        let keys = store.list("post:").await.unwrap();

        assert_eq!(keys, vec!["post:a", "post:b", "post:c"]);
    }

    #[tokio::test]
    async fn test_put_if_absentは同時実行でも一度だけ成功する() {
        let store = Arc::new(InMemoryKvStore::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .put_if_absent("user@example.com", &i.to_string())
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }
}
