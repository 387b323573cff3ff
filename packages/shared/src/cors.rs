//! # CORS ヘッダー
//!
//! サービスごとに固定された CORS ポリシーから、レスポンスに付与するヘッダーを組み立てる。
//!
//! ## Allow-Origin の決定
//!
//! | ポリシー | `Origin` ヘッダー | `Access-Control-Allow-Origin` |
//! |---------|------------------|-------------------------------|
//! | [`AllowOrigin::Any`] | 任意 | `*` |
//! | [`AllowOrigin::List`] | いずれかのパターンに一致 | リクエストの Origin をそのまま返す |
//! | [`AllowOrigin::List`] | 一致しない / なし | `*` |
//!
//! 許可リストの各エントリは正規表現として扱い、部分一致で判定する。
//! `http://localhost:*` のような glob 風の記述も正規表現として解釈される点に注意
//! （`*` は直前の文字の 0 回以上の繰り返し）。

use http::{
    HeaderMap,
    HeaderValue,
    header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        ACCESS_CONTROL_ALLOW_HEADERS,
        ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_ALLOW_ORIGIN,
    },
};
use regex::Regex;

/// Origin の許可方針
#[derive(Debug, Clone)]
pub enum AllowOrigin {
    /// すべての Origin に `*` を返す
    Any,
    /// パターンに一致した Origin を反映する
    List(OriginAllowList),
}

/// 正規表現の Origin 許可リスト
#[derive(Debug, Clone, Default)]
pub struct OriginAllowList(Vec<Regex>);

impl OriginAllowList {
    /// パターン文字列から許可リストを作成する
    ///
    /// 空白のみのエントリは無視する。
    pub fn parse<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<Self, regex::Error> {
        patterns
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(Regex::new)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// いずれかのパターンに一致するか
    pub fn matches(&self, origin: &str) -> bool {
        self.0.iter().any(|pattern| pattern.is_match(origin))
    }
}

/// CORS ポリシー
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin:      AllowOrigin,
    allow_methods:     HeaderValue,
    allow_headers:     HeaderValue,
    allow_credentials: bool,
}

impl CorsPolicy {
    pub fn new(
        allow_origin: AllowOrigin,
        allow_methods: &'static str,
        allow_headers: &'static str,
    ) -> Self {
        Self {
            allow_origin,
            allow_methods: HeaderValue::from_static(allow_methods),
            allow_headers: HeaderValue::from_static(allow_headers),
            allow_credentials: false,
        }
    }

    /// `Access-Control-Allow-Credentials: true` を付与する
    pub fn with_credentials(mut self) -> Self {
        self.allow_credentials = true;
        self
    }

    /// リクエストの `Origin` に対する CORS ヘッダーを返す
    pub fn headers_for(&self, origin: Option<&HeaderValue>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin_for(origin));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        if self.allow_credentials {
            headers.insert(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        headers
    }

    fn allow_origin_for(&self, origin: Option<&HeaderValue>) -> HeaderValue {
        let any = HeaderValue::from_static("*");
        let AllowOrigin::List(allow_list) = &self.allow_origin else {
            return any;
        };

        match origin {
            Some(value) => match value.to_str() {
                Ok(origin) if allow_list.matches(origin) => value.clone(),
                _ => any,
            },
            None => any,
        }
    }
}
