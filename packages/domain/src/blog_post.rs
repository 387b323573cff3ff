//! # ブログ投稿
//!
//! ブログサービスが管理する投稿レコードと、その読み取り・作成・置換のルール。
//!
//! ## ストア上の表現
//!
//! | キー | 値 |
//! |-----|-----|
//! | `post:{slug}` | [`BlogPost`] (JSON, camelCase) |
//!
//! レコード内の `slug` は常にキーのスラッグ部分と一致する。
//!
//! ## ライフサイクル
//!
//! ```text
//! POST (作成, datePublished = now, lastUpdated = null)
//!   → PUT (置換, datePublished 維持, lastUpdated = now) ...
//!   → DELETE
//! ```
//!
//! ## 読み取り時の補完
//!
//! ストア上のドキュメントは欠損フィールドを許容する（[`StoredPost`]）。
//! 一覧・個別取得ではデフォルト値で補完した [`PostSummary`] / [`BlogPost`] を返す。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, error::present};

/// 投稿キーの接頭辞
pub const POST_KEY_PREFIX: &str = "post:";

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_DESCRIPTION: &str = "No description available";
const DEFAULT_AUTHOR: &str = "Unknown";

// =========================================================================
// Slug
// =========================================================================

/// 投稿のスラッグ（値オブジェクト）
///
/// 空文字列でないことを保証する。URL 安全性は検証しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// スラッグを作成する
    ///
    /// 空文字列の場合は [`DomainError::MissingSlug`] を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::MissingSlug);
        }
        Ok(Self(value))
    }

    /// ストアのキー（`post:{slug}`）からスラッグを取り出す
    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix(POST_KEY_PREFIX)
            .and_then(|slug| Self::new(slug).ok())
    }

    /// ストアのキーを返す
    pub fn storage_key(&self) -> String {
        format!("{POST_KEY_PREFIX}{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =========================================================================
// 読み取りモデル
// =========================================================================

/// 投稿の要約（本文を除く全フィールド）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub title:            String,
    pub slug:             String,
    pub meta_description: String,
    pub meta_keywords:    Vec<String>,
    pub cover_image_url:  String,
    pub author:           String,
    #[serde(with = "crate::timestamp")]
    pub date_published:   DateTime<Utc>,
    #[serde(default, with = "crate::timestamp::option")]
    pub last_updated:     Option<DateTime<Utc>>,
}

/// 投稿レコード（本文を含む）
///
/// ストアへの書き込みと個別取得のレスポンスに使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub content: String,
}

impl BlogPost {
    pub fn slug(&self) -> &str {
        &self.summary.slug
    }

    pub fn into_summary(self) -> PostSummary {
        self.summary
    }
}

/// ストアに保存されている投稿ドキュメント
///
/// 過去に書き込まれたレコードには欠損フィールドがありうるため、
/// すべてのフィールドを省略可能として読み込む。
/// 日時は [`crate::timestamp::lenient`] で読み、解釈できない値は欠損と同じ扱いにする。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPost {
    pub title:            Option<String>,
    pub slug:             Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords:    Option<Vec<String>>,
    pub cover_image_url:  Option<String>,
    pub author:           Option<String>,
    pub content:          Option<String>,
    #[serde(default, deserialize_with = "crate::timestamp::lenient::deserialize")]
    pub date_published:   Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::timestamp::lenient::deserialize")]
    pub last_updated:     Option<DateTime<Utc>>,
}

impl StoredPost {
    /// 欠損フィールドを補完して完全な投稿にする
    ///
    /// - `slug` がなければキーのスラッグ
    /// - `datePublished` がなければ `now`
    /// - `lastUpdated` は補完しない
    pub fn into_post(self, key_slug: &Slug, now: DateTime<Utc>) -> BlogPost {
        BlogPost {
            summary: PostSummary {
                title:            self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                slug:             self.slug.unwrap_or_else(|| key_slug.to_string()),
                meta_description: self
                    .meta_description
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
                meta_keywords:    self.meta_keywords.unwrap_or_default(),
                cover_image_url:  self.cover_image_url.unwrap_or_default(),
                author:           self.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
                date_published:   self.date_published.unwrap_or(now),
                last_updated:     self.last_updated,
            },
            content: self.content.unwrap_or_default(),
        }
    }

    /// サイトマップの `lastmod` に使う日時
    ///
    /// `lastUpdated` → `datePublished` → `now` の順で採用する。
    pub fn last_modified(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.last_updated.or(self.date_published).unwrap_or(now)
    }
}

/// 要約を公開日時の降順（新しい順）に並べる
///
/// 安定ソートのため、同時刻の投稿は元の（スキャン）順を保つ。
pub fn sort_newest_first(posts: &mut [PostSummary]) {
    posts.sort_by(|a, b| b.date_published.cmp(&a.date_published));
}

// =========================================================================
// 書き込み入力
// =========================================================================

/// 作成・置換リクエストの本文
///
/// 作成時の `datePublished` は使わない（[`PostDraft::into_new_post`] が `now` にする）。
/// 置換時の `datePublished` は [`crate::timestamp::lenient`] で読む。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub slug:             Option<String>,
    pub title:            Option<String>,
    pub content:          Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords:    Option<Vec<String>>,
    pub cover_image_url:  Option<String>,
    pub author:           Option<String>,
    #[serde(default, deserialize_with = "crate::timestamp::lenient::deserialize")]
    pub date_published:   Option<DateTime<Utc>>,
}

impl PostDraft {
    /// 新規投稿を作成する
    ///
    /// 検証順序: スラッグ → タイトルと本文。
    /// `datePublished` は `now`、`lastUpdated` は `null` で初期化する。
    pub fn into_new_post(self, now: DateTime<Utc>) -> Result<BlogPost, DomainError> {
        let slug = Slug::new(self.slug.clone().unwrap_or_default())?;
        self.build(slug, now, None)
    }

    /// 既存投稿を置換するレコードを作成する
    ///
    /// `datePublished` は既存レコードの値 → 本文の値 → `now` の順で採用し、
    /// `lastUpdated` は `now` にする。スラッグはパスの値で固定する。
    pub fn into_replacement(
        self,
        slug: Slug,
        existing_published: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<BlogPost, DomainError> {
        let published = existing_published.or(self.date_published).unwrap_or(now);
        self.build(slug, published, Some(now))
    }

    /// タイトルと本文が揃っているか検証する
    ///
    /// 置換時に既存レコードを読む前の事前検証に使う。
    pub fn ensure_title_and_content(&self) -> Result<(), DomainError> {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        if filled(&self.title) && filled(&self.content) {
            Ok(())
        } else {
            Err(DomainError::MissingFields("title, content"))
        }
    }

    fn build(
        self,
        slug: Slug,
        date_published: DateTime<Utc>,
        last_updated: Option<DateTime<Utc>>,
    ) -> Result<BlogPost, DomainError> {
        let (Some(title), Some(content)) = (present(self.title), present(self.content)) else {
            return Err(DomainError::MissingFields("title, content"));
        };

        Ok(BlogPost {
            summary: PostSummary {
                title,
                slug: slug.0,
                meta_description: self.meta_description.unwrap_or_default(),
                meta_keywords: self.meta_keywords.unwrap_or_default(),
                cover_image_url: self.cover_image_url.unwrap_or_default(),
                author: present(self.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
                date_published,
                last_updated,
            },
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap()
    }

    fn draft(slug: &str, title: &str, content: &str) -> PostDraft {
        PostDraft {
            slug: Some(slug.to_string()),
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    // ===== Slug =====

    #[test]
    fn test_slug_空文字列はエラー() {
        assert_eq!(Slug::new(""), Err(DomainError::MissingSlug));
    }

    #[test]
    fn test_slug_ストアキーとの相互変換() {
        let slug = Slug::new("hello-world").unwrap();

        assert_eq!(slug.storage_key(), "post:hello-world");
        assert_eq!(Slug::from_storage_key("post:hello-world"), Some(slug));
        assert_eq!(Slug::from_storage_key("user:hello-world"), None);
        assert_eq!(Slug::from_storage_key("post:"), None);
    }

    // ===== StoredPost =====

    #[test]
    fn test_into_post_欠損フィールドをデフォルトで補完する() {
        let slug = Slug::new("from-key").unwrap();

        let post = StoredPost::default().into_post(&slug, at(1));

        assert_eq!(post.summary.title, "Untitled");
        assert_eq!(post.summary.slug, "from-key");
        assert_eq!(post.summary.meta_description, "No description available");
        assert!(post.summary.meta_keywords.is_empty());
        assert_eq!(post.summary.cover_image_url, "");
        assert_eq!(post.summary.author, "Unknown");
        assert_eq!(post.summary.date_published, at(1));
        assert_eq!(post.summary.last_updated, None);
        assert_eq!(post.content, "");
    }

    #[test]
    fn test_into_post_保存済みの値を優先する() {
        let json = r#"{
            "title": "T",
            "slug": "a",
            "metaDescription": "",
            "metaKeywords": ["x"],
            "author": "Alice",
            "content": "C",
            "datePublished": "2024-05-02T09:30:00.000Z",
            "lastUpdated": null
        }"#;
        let stored: StoredPost = serde_json::from_str(json).unwrap();

        let post = stored.into_post(&Slug::new("a").unwrap(), at(9));

        assert_eq!(post.summary.title, "T");
        assert_eq!(post.summary.meta_description, "");
        assert_eq!(post.summary.meta_keywords, vec!["x".to_string()]);
        assert_eq!(post.summary.author, "Alice");
        assert_eq!(post.summary.date_published, at(2));
        assert_eq!(post.content, "C");
    }

    #[test]
    fn test_stored_post_日付のみや不正な日時でも読み込める() {
        let json = r#"{
            "title": "Legacy",
            "datePublished": "2024-05-01",
            "lastUpdated": "yesterday"
        }"#;

        let stored: StoredPost = serde_json::from_str(json).unwrap();

        assert_eq!(stored.date_published, Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()));
        assert_eq!(stored.last_updated, None);
    }

    #[rstest]
    #[case(Some(at(3)), Some(at(2)), at(3))]
    #[case(None, Some(at(2)), at(2))]
    #[case(None, None, at(9))]
    fn test_last_modified_の採用順序(
        #[case] last_updated: Option<DateTime<Utc>>,
        #[case] date_published: Option<DateTime<Utc>>,
        #[case] expected: DateTime<Utc>,
    ) {
        let stored = StoredPost {
            last_updated,
            date_published,
            ..Default::default()
        };

        assert_eq!(stored.last_modified(at(9)), expected);
    }

    // ===== 並び順 =====

    #[test]
    fn test_sort_newest_first_公開日時の降順で同時刻は元の順を保つ() {
        let mut posts: Vec<PostSummary> = [(1, "old"), (3, "new"), (2, "mid-a"), (2, "mid-b")]
            .into_iter()
            .map(|(day, slug)| {
                draft(slug, "T", "C")
                    .into_new_post(at(day))
                    .unwrap()
                    .into_summary()
            })
            .collect();

        sort_newest_first(&mut posts);

        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid-a", "mid-b", "old"]);
    }

    // ===== PostDraft =====

    #[test]
    fn test_into_new_post_作成時のデフォルト値() {
        let post = draft("a", "T", "C").into_new_post(at(1)).unwrap();

        assert_eq!(post.slug(), "a");
        assert_eq!(post.summary.meta_description, "");
        assert_eq!(post.summary.author, "Unknown");
        assert_eq!(post.summary.date_published, at(1));
        assert_eq!(post.summary.last_updated, None);
    }

    #[test]
    fn test_into_new_post_スラッグ欠落はタイトル欠落より先に検出する() {
        let input = PostDraft::default();

        assert_eq!(input.into_new_post(at(1)), Err(DomainError::MissingSlug));
    }

    #[rstest]
    #[case(None, Some("C"))]
    #[case(Some("T"), None)]
    #[case(Some(""), Some("C"))]
    fn test_into_new_post_タイトルと本文は必須(
        #[case] title: Option<&str>,
        #[case] content: Option<&str>,
    ) {
        let input = PostDraft {
            slug: Some("a".to_string()),
            title: title.map(str::to_string),
            content: content.map(str::to_string),
            ..Default::default()
        };

        assert!(matches!(
            input.into_new_post(at(1)),
            Err(DomainError::MissingFields(_))
        ));
    }

    #[rstest]
    #[case(Some(at(1)), Some(at(2)), at(1))]
    #[case(None, Some(at(2)), at(2))]
    #[case(None, None, at(5))]
    fn test_into_replacement_公開日時の採用順序(
        #[case] existing: Option<DateTime<Utc>>,
        #[case] from_body: Option<DateTime<Utc>>,
        #[case] expected: DateTime<Utc>,
    ) {
        let input = PostDraft {
            date_published: from_body,
            ..draft("ignored", "T2", "C2")
        };

        let post = input
            .into_replacement(Slug::new("a").unwrap(), existing, at(5))
            .unwrap();

        assert_eq!(post.slug(), "a");
        assert_eq!(post.summary.date_published, expected);
        assert_eq!(post.summary.last_updated, Some(at(5)));
    }

    #[test]
    fn test_post_draft_日時として読めないdate_publishedを無視する() {
        let json = r#"{"slug":"a","title":"T","content":"C","datePublished":"next week"}"#;

        let input: PostDraft = serde_json::from_str(json).unwrap();

        assert_eq!(input.date_published, None);
        assert_eq!(input.into_new_post(at(1)).unwrap().summary.date_published, at(1));
    }

    // ===== シリアライズ =====

    #[test]
    fn test_blog_postのシリアライズ形式() {
        let post = draft("a", "T", "C").into_new_post(at(1)).unwrap();

        let json = serde_json::to_value(&post).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "title": "T",
                "slug": "a",
                "metaDescription": "",
                "metaKeywords": [],
                "coverImageUrl": "",
                "author": "Unknown",
                "datePublished": "2024-05-01T09:30:00.000Z",
                "lastUpdated": null,
                "content": "C"
            })
        );
    }

    #[test]
    fn test_要約のシリアライズは本文を含まない() {
        let summary = draft("a", "T", "C")
            .into_new_post(at(1))
            .unwrap()
            .into_summary();

        let json = serde_json::to_value(&summary).unwrap();

        assert!(json.get("content").is_none());
        assert_eq!(json["slug"], "a");
    }
}
