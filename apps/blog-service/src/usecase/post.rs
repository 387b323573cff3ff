//! # ブログ投稿ユースケース
//!
//! 投稿の一覧・作成・取得・置換・削除とサイトマップ生成を行う。
//!
//! ## 一覧とサイトマップの耐障害性
//!
//! キーの列挙に失敗した場合はリクエスト全体を失敗させるが、
//! 個別レコードの読み込み失敗は warn ログを出してスキップする。

use std::sync::Arc;

use edgeblog_domain::{
    blog_post::{BlogPost, PostDraft, PostSummary, Slug, StoredPost, sort_newest_first},
    clock::Clock,
};
use edgeblog_infra::repository::BlogPostRepository;

use super::SitemapBuilder;
use crate::error::BlogError;

/// ブログユースケースの実装
pub struct BlogUseCaseImpl {
    repository:    Option<Arc<dyn BlogPostRepository>>,
    clock:         Arc<dyn Clock>,
    site_base_url: String,
}

impl BlogUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    ///
    /// `repository` が `None` の場合、すべての操作が `StoreUnconfigured` を返す。
    pub fn new(
        repository: Option<Arc<dyn BlogPostRepository>>,
        clock: Arc<dyn Clock>,
        site_base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            clock,
            site_base_url: site_base_url.into(),
        }
    }

    pub(crate) fn repository(&self) -> Result<&Arc<dyn BlogPostRepository>, BlogError> {
        self.repository.as_ref().ok_or(BlogError::StoreUnconfigured)
    }

    /// キーを列挙し、読み込めたレコードをスラッグとともに返す
    async fn load_all(
        &self,
        on_list_error: fn(edgeblog_infra::InfraError) -> BlogError,
    ) -> Result<Vec<(Slug, StoredPost)>, BlogError> {
        let repository = self.repository()?;
        let keys = repository.list_keys().await.map_err(on_list_error)?;
        tracing::debug!(count = keys.len(), "投稿キーを取得しました");

        let mut posts = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(slug) = Slug::from_storage_key(&key) else {
                tracing::warn!(key = %key, "スラッグのないキーをスキップします");
                continue;
            };
            match repository.find_by_key(&key).await {
                Ok(Some(stored)) => posts.push((slug, stored)),
                // 列挙後に削除された
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "投稿の読み込みに失敗したためスキップします");
                }
            }
        }
        Ok(posts)
    }

    /// 全投稿の要約を公開日時の新しい順に返す
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, BlogError> {
        let now = self.clock.now();
        let mut summaries: Vec<PostSummary> = self
            .load_all(BlogError::list_failure)
            .await?
            .into_iter()
            .map(|(slug, stored)| stored.into_post(&slug, now).into_summary())
            .collect();

        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    /// 投稿を作成する
    ///
    /// 存在確認と書き込みは `insert_if_absent` の 1 操作で行う。
    pub async fn create_post(&self, draft: PostDraft) -> Result<Slug, BlogError> {
        let repository = self.repository()?;
        let post = draft.into_new_post(self.clock.now())?;
        let slug = Slug::new(post.slug())?;

        let created = repository
            .insert_if_absent(&post)
            .await
            .map_err(BlogError::list_failure)?;
        if !created {
            return Err(BlogError::PostAlreadyExists);
        }

        tracing::info!(slug = %slug, title = %post.summary.title, "投稿を作成しました");
        Ok(slug)
    }

    /// 投稿を取得する
    pub async fn get_post(&self, slug: &Slug) -> Result<BlogPost, BlogError> {
        let stored = self
            .repository()?
            .find(slug)
            .await
            .map_err(BlogError::post_failure)?
            .ok_or_else(|| BlogError::PostNotFound {
                slug: slug.to_string(),
            })?;

        Ok(stored.into_post(slug, self.clock.now()))
    }

    /// 投稿を置換する
    ///
    /// 既存レコードは `datePublished` を引き継ぐためだけに読む。
    pub async fn replace_post(&self, slug: Slug, draft: PostDraft) -> Result<(), BlogError> {
        let repository = self.repository()?;
        draft.ensure_title_and_content()?;

        let existing = repository
            .find(&slug)
            .await
            .map_err(BlogError::post_failure)?;
        let existing_published = existing.and_then(|stored| stored.date_published);

        let post = draft.into_replacement(slug, existing_published, self.clock.now())?;
        repository
            .upsert(&post)
            .await
            .map_err(BlogError::post_failure)?;

        tracing::info!(slug = %post.slug(), "投稿を更新しました");
        Ok(())
    }

    /// 投稿を削除する
    pub async fn delete_post(&self, slug: &Slug) -> Result<(), BlogError> {
        let repository = self.repository()?;

        let existing = repository
            .find(slug)
            .await
            .map_err(BlogError::post_failure)?;
        if existing.is_none() {
            return Err(BlogError::PostNotFound {
                slug: slug.to_string(),
            });
        }

        repository
            .delete(slug)
            .await
            .map_err(BlogError::post_failure)?;

        tracing::info!(slug = %slug, "投稿を削除しました");
        Ok(())
    }

    /// サイトマップ XML を生成する
    ///
    /// レコード内に `slug` を持つ投稿のみ出力する。
    pub async fn sitemap(&self) -> Result<String, BlogError> {
        let now = self.clock.now();
        let mut builder = SitemapBuilder::new(&self.site_base_url);

        for (_, stored) in self.load_all(BlogError::sitemap_failure).await? {
            let Some(slug) = stored.slug.as_deref().filter(|s| !s.is_empty()) else {
                continue;
            };
            builder.add_post(slug, stored.last_modified(now).date_naive());
        }

        builder.finish().map_err(BlogError::sitemap_failure)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use edgeblog_domain::clock::FixedClock;
    use edgeblog_infra::{InMemoryKvStore, InfraError, KvStore, repository::KvBlogPostRepository};
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap()
    }

    fn sut_with(store: Arc<InMemoryKvStore>, now: DateTime<Utc>) -> BlogUseCaseImpl {
        BlogUseCaseImpl::new(
            Some(Arc::new(KvBlogPostRepository::new(store))),
            Arc::new(FixedClock::new(now)),
            "https://blog.example.com",
        )
    }

    fn draft(slug: &str) -> PostDraft {
        PostDraft {
            slug: Some(slug.to_string()),
            title: Some(format!("Title {slug}")),
            content: Some("<p>body</p>".to_string()),
            ..Default::default()
        }
    }

    fn slug(s: &str) -> Slug {
        Slug::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_作成した投稿を取得できる() {
        let sut = sut_with(Arc::new(InMemoryKvStore::new()), at(1));

        let created = sut.create_post(draft("a")).await.unwrap();
        let post = sut.get_post(&created).await.unwrap();

        assert_eq!(post.summary.title, "Title a");
        assert_eq!(post.summary.date_published, at(1));
        assert_eq!(post.summary.last_updated, None);
        assert_eq!(post.summary.author, "Unknown");
        assert_eq!(post.content, "<p>body</p>");
    }

    #[tokio::test]
    async fn test_同じスラッグの作成は409() {
        let sut = sut_with(Arc::new(InMemoryKvStore::new()), at(1));
        sut.create_post(draft("a")).await.unwrap();

        let result = sut.create_post(draft("a")).await;

        assert!(matches!(result, Err(BlogError::PostAlreadyExists)));
    }

    #[tokio::test]
    async fn test_作成時はスラッグを先に検証する() {
        let sut = sut_with(Arc::new(InMemoryKvStore::new()), at(1));

        let result = sut.create_post(PostDraft::default()).await;

        assert!(matches!(result, Err(BlogError::MissingSlug)));
    }

    #[tokio::test]
    async fn test_置換は公開日時を維持し更新日時を設定する() {
        let store = Arc::new(InMemoryKvStore::new());
        sut_with(store.clone(), at(1))
            .create_post(draft("a"))
            .await
            .unwrap();
        let later = sut_with(store, at(3));

        let mut update = draft("ignored");
        update.title = Some("New".to_string());
        update.date_published = Some(at(2));
        later.replace_post(slug("a"), update).await.unwrap();

        let post = later.get_post(&slug("a")).await.unwrap();
        assert_eq!(post.summary.title, "New");
        assert_eq!(post.summary.slug, "a");
        assert_eq!(post.summary.date_published, at(1));
        assert_eq!(post.summary.last_updated, Some(at(3)));
    }

    #[tokio::test]
    async fn test_存在しない投稿の置換は本文の公開日時を使って作成する() {
        let sut = sut_with(Arc::new(InMemoryKvStore::new()), at(3));
        let mut body = draft("a");
        body.date_published = Some(at(2));

        sut.replace_post(slug("a"), body).await.unwrap();

        let post = sut.get_post(&slug("a")).await.unwrap();
        assert_eq!(post.summary.date_published, at(2));
        assert_eq!(post.summary.last_updated, Some(at(3)));
    }

    #[tokio::test]
    async fn test_置換はタイトルと本文が必須() {
        let sut = sut_with(Arc::new(InMemoryKvStore::new()), at(1));
        let mut body = draft("a");
        body.content = None;

        let result = sut.replace_post(slug("a"), body).await;

        assert!(matches!(result, Err(BlogError::MissingFields)));
    }

    #[tokio::test]
    async fn test_削除後は404() {
        let sut = sut_with(Arc::new(InMemoryKvStore::new()), at(1));
        sut.create_post(draft("a")).await.unwrap();

        sut.delete_post(&slug("a")).await.unwrap();

        let result = sut.get_post(&slug("a")).await;
        let Err(BlogError::PostNotFound { slug }) = result else {
            panic!("PostNotFound になること");
        };
        assert_eq!(slug, "a");
    }

    #[tokio::test]
    async fn test_存在しない投稿の削除は404() {
        let sut = sut_with(Arc::new(InMemoryKvStore::new()), at(1));

        let result = sut.delete_post(&slug("missing")).await;

        assert!(matches!(result, Err(BlogError::PostNotFound { .. })));
    }

    #[tokio::test]
    async fn test_一覧は公開日時の新しい順で欠損フィールドを補完する() {
        let store = Arc::new(InMemoryKvStore::new());
        for (day, s) in [(1, "old"), (3, "new"), (2, "mid")] {
            sut_with(store.clone(), at(day))
                .create_post(draft(s))
                .await
                .unwrap();
        }
        store
            .put("post:legacy", r#"{"title":"Legacy"}"#)
            .await
            .unwrap();
        let sut = sut_with(store, at(4));

        let posts = sut.list_posts().await.unwrap();

        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["legacy", "new", "mid", "old"]);
        assert_eq!(posts[0].meta_description, "No description available");
        assert_eq!(posts[0].date_published, at(4));
    }

    #[tokio::test]
    async fn test_一覧は壊れたレコードをスキップする() {
        let store = Arc::new(InMemoryKvStore::new());
        store.put("post:broken", "{not json").await.unwrap();
        let sut = sut_with(store.clone(), at(1));
        sut.create_post(draft("ok")).await.unwrap();

        let posts = sut.list_posts().await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "ok");
    }

    #[tokio::test]
    async fn test_空のストアは空の一覧() {
        let sut = sut_with(Arc::new(InMemoryKvStore::new()), at(1));

        assert!(sut.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ストア未設定なら全操作がstore_unconfigured() {
        let sut = BlogUseCaseImpl::new(None, Arc::new(FixedClock::new(at(1))), "https://x");

        assert!(matches!(sut.list_posts().await, Err(BlogError::StoreUnconfigured)));
        assert!(matches!(
            sut.create_post(draft("a")).await,
            Err(BlogError::StoreUnconfigured)
        ));
        assert!(matches!(
            sut.get_post(&slug("a")).await,
            Err(BlogError::StoreUnconfigured)
        ));
        assert!(matches!(sut.sitemap().await, Err(BlogError::StoreUnconfigured)));
    }

    #[tokio::test]
    async fn test_サイトマップはスラッグを持つ投稿のみ出力する() {
        let store = Arc::new(InMemoryKvStore::new());
        store
            .put(
                "post:no-slug",
                r#"{"title":"x","datePublished":"2024-05-01T00:00:00.000Z"}"#,
            )
            .await
            .unwrap();
        let sut = sut_with(store, at(2));
        sut.create_post(draft("a")).await.unwrap();

        let xml = sut.sitemap().await.unwrap();

        assert!(xml.contains("<loc>https://blog.example.com/blog/a</loc>"));
        assert!(xml.contains("<lastmod>2024-05-02</lastmod>"));
        assert!(!xml.contains("no-slug"));
    }

    // キー列挙に失敗するストア
    struct FailingListStore;

    #[async_trait]
    impl KvStore for FailingListStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, InfraError> {
            Ok(None)
        }

        async fn put(&self, _key: &str, _value: &str) -> Result<(), InfraError> {
            Ok(())
        }

        async fn put_if_absent(&self, _key: &str, _value: &str) -> Result<bool, InfraError> {
            Ok(true)
        }

        async fn delete(&self, _key: &str) -> Result<(), InfraError> {
            Ok(())
        }

        async fn list(&self, _prefix: &str) -> Result<Vec<String>, InfraError> {
            Err(InfraError::unexpected("list failed"))
        }
    }

    #[tokio::test]
    async fn test_キー列挙の失敗はリクエスト全体を失敗させる() {
        let sut = BlogUseCaseImpl::new(
            Some(Arc::new(KvBlogPostRepository::new(Arc::new(FailingListStore)))),
            Arc::new(FixedClock::new(at(1))),
            "https://blog.example.com",
        );

        let result = sut.sitemap().await;

        let Err(error) = result else {
            panic!("エラーになること");
        };
        assert_eq!(error.reason(), "予期しないエラー: list failed");
    }
}
