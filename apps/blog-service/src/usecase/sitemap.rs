//! # サイトマップ生成
//!
//! [sitemaps.org](http://www.sitemaps.org/schemas/sitemap/0.9) 形式の XML を組み立てる。
//! 要素は serde の構造体として持ち、`quick_xml::se` で書き出す。
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>                       サイトのルート（daily, 1.0）
//!   <url>                       /blog（daily, 0.8）
//!   <url> ...                   投稿ごと（lastmod 付き, weekly, 0.7）
//! </urlset>
//! ```

use chrono::NaiveDate;
use quick_xml::{
    errors::serialize::SeError,
    se::{QuoteLevel, Serializer},
};
use serde::Serialize;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Serialize)]
#[serde(rename = "urlset")]
struct UrlSet {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    url:   Vec<UrlEntry>,
}

#[derive(Debug, Serialize)]
struct UrlEntry {
    loc:        String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lastmod:    Option<String>,
    changefreq: &'static str,
    priority:   &'static str,
}

/// サイトマップ XML のビルダー
///
/// 生成時にサイトのルートと `/blog` のエントリを含む。
#[derive(Debug)]
pub struct SitemapBuilder {
    base_url: String,
    entries:  Vec<UrlEntry>,
}

impl SitemapBuilder {
    /// `base_url` は末尾に `/` を含まないこと
    pub fn new(base_url: &str) -> Self {
        let entries = vec![
            UrlEntry {
                loc:        base_url.to_owned(),
                lastmod:    None,
                changefreq: "daily",
                priority:   "1.0",
            },
            UrlEntry {
                loc:        format!("{base_url}/blog"),
                lastmod:    None,
                changefreq: "daily",
                priority:   "0.8",
            },
        ];
        Self {
            base_url: base_url.to_owned(),
            entries,
        }
    }

    /// 投稿のエントリを追加する
    pub fn add_post(&mut self, slug: &str, last_modified: NaiveDate) {
        self.entries.push(UrlEntry {
            loc:        format!("{}/blog/{slug}", self.base_url),
            lastmod:    Some(last_modified.format("%Y-%m-%d").to_string()),
            changefreq: "weekly",
            priority:   "0.7",
        });
    }

    /// XML 宣言付きの文書にする
    ///
    /// テキストノードの `&` `<` `>` と引用符はすべて実体参照にする。
    pub fn finish(self) -> Result<String, SeError> {
        let urlset = UrlSet {
            xmlns: SITEMAP_NS,
            url:   self.entries,
        };

        let mut body = String::new();
        let mut serializer = Serializer::new(&mut body);
        serializer.indent(' ', 2);
        serializer.set_quote_level(QuoteLevel::Full);
        urlset.serialize(serializer)?;

        Ok(format!("{DECLARATION}\n{body}"))
    }
}
