//! # ユースケース層
//!
//! Blog Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラのテストでスタブに差し替えられるようトレイトを定義
//! - **依存性注入**: リポジトリ、時刻、サイト URL を外部から注入
//! - **ストア未設定の許容**: リポジトリがない状態でも起動し、各操作が
//!   [`BlogError::StoreUnconfigured`] を返す

pub mod post;
pub mod sitemap;

use async_trait::async_trait;
use edgeblog_domain::blog_post::{BlogPost, PostDraft, PostSummary, Slug};
pub use post::BlogUseCaseImpl;
pub use sitemap::SitemapBuilder;

use crate::error::BlogError;

/// ブログユースケーストレイト
#[async_trait]
pub trait BlogUseCase: Send + Sync {
    /// ストアが設定されているか確認する
    ///
    /// API キー検証より先に評価するため、ハンドラから直接呼ぶ。
    fn ensure_store(&self) -> Result<(), BlogError>;

    /// 全投稿の要約を公開日時の新しい順に返す
    ///
    /// 個別レコードの読み込み失敗はログに残してスキップする。
    async fn list_posts(&self) -> Result<Vec<PostSummary>, BlogError>;

    /// 投稿を作成し、そのスラッグを返す
    async fn create_post(&self, draft: PostDraft) -> Result<Slug, BlogError>;

    /// 投稿を取得する（欠損フィールドは補完済み）
    async fn get_post(&self, slug: &Slug) -> Result<BlogPost, BlogError>;

    /// 投稿を置換する（存在しなければ作成する）
    async fn replace_post(&self, slug: Slug, draft: PostDraft) -> Result<(), BlogError>;

    /// 投稿を削除する
    async fn delete_post(&self, slug: &Slug) -> Result<(), BlogError>;

    /// サイトマップ XML を生成する
    async fn sitemap(&self) -> Result<String, BlogError>;
}

#[async_trait]
impl BlogUseCase for BlogUseCaseImpl {
    fn ensure_store(&self) -> Result<(), BlogError> {
        self.repository().map(|_| ())
    }

    async fn list_posts(&self) -> Result<Vec<PostSummary>, BlogError> {
        self.list_posts().await
    }

    async fn create_post(&self, draft: PostDraft) -> Result<Slug, BlogError> {
        self.create_post(draft).await
    }

    async fn get_post(&self, slug: &Slug) -> Result<BlogPost, BlogError> {
        self.get_post(slug).await
    }

    async fn replace_post(&self, slug: Slug, draft: PostDraft) -> Result<(), BlogError> {
        self.replace_post(slug, draft).await
    }

    async fn delete_post(&self, slug: &Slug) -> Result<(), BlogError> {
        self.delete_post(slug).await
    }

    async fn sitemap(&self) -> Result<String, BlogError> {
        self.sitemap().await
    }
}
