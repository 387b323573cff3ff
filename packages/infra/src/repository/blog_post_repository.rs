//! # BlogPostRepository
//!
//! ブログ投稿レコードの永続化を担当するリポジトリ。
//!
//! キーは `post:{slug}`、値は [`BlogPost`] の JSON。
//! 読み取りは欠損フィールドを許容する [`StoredPost`] として返し、
//! デフォルト値の補完は呼び出し側で行う。

use std::sync::Arc;

use async_trait::async_trait;
use edgeblog_domain::blog_post::{BlogPost, POST_KEY_PREFIX, Slug, StoredPost};

use crate::{KvStore, error::InfraError, kv};

/// ブログ投稿リポジトリトレイト
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// 全投稿のキーを列挙する（`post:` 接頭辞スキャン）
    async fn list_keys(&self) -> Result<Vec<String>, InfraError>;

    /// キーを指定して投稿を取得する
    async fn find_by_key(&self, key: &str) -> Result<Option<StoredPost>, InfraError>;

    /// スラッグを指定して投稿を取得する
    async fn find(&self, slug: &Slug) -> Result<Option<StoredPost>, InfraError>;

    /// 同じスラッグの投稿が存在しない場合のみ保存する
    ///
    /// # 戻り値
    ///
    /// 保存した場合は `true`、既に存在した場合は `false`
    async fn insert_if_absent(&self, post: &BlogPost) -> Result<bool, InfraError>;

    /// 投稿を保存する（存在すれば置換する）
    async fn upsert(&self, post: &BlogPost) -> Result<(), InfraError>;

    /// 投稿を削除する
    async fn delete(&self, slug: &Slug) -> Result<(), InfraError>;
}

/// KV ストア実装の BlogPostRepository
#[derive(Clone)]
pub struct KvBlogPostRepository {
    store: Arc<dyn KvStore>,
}

impl KvBlogPostRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn key_of(post: &BlogPost) -> String {
        format!("{POST_KEY_PREFIX}{}", post.slug())
    }
}

#[async_trait]
impl BlogPostRepository for KvBlogPostRepository {
    async fn list_keys(&self) -> Result<Vec<String>, InfraError> {
        self.store.list(POST_KEY_PREFIX).await
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<StoredPost>, InfraError> {
        kv::get_json(self.store.as_ref(), key).await
    }

    async fn find(&self, slug: &Slug) -> Result<Option<StoredPost>, InfraError> {
        self.find_by_key(&slug.storage_key()).await
    }

    async fn insert_if_absent(&self, post: &BlogPost) -> Result<bool, InfraError> {
        kv::put_json_if_absent(self.store.as_ref(), &Self::key_of(post), post).await
    }

    async fn upsert(&self, post: &BlogPost) -> Result<(), InfraError> {
        kv::put_json(self.store.as_ref(), &Self::key_of(post), post).await
    }

    async fn delete(&self, slug: &Slug) -> Result<(), InfraError> {
        self.store.delete(&slug.storage_key()).await
    }
}
