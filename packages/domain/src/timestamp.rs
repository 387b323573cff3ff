//! # タイムスタンプ形式
//!
//! レコード上のタイムスタンプは `2024-05-01T12:00:00.000Z` 形式
//! （UTC、ミリ秒固定 3 桁）で書き出す。読み込みは RFC 3339 全般を受け付ける。
//!
//! `#[serde(with = "edgeblog_domain::timestamp")]` /
//! `#[serde(with = "edgeblog_domain::timestamp::option")]` で使用する。
//!
//! ストア上の古いレコードやリクエストボディの値は [`lenient`] で読む。
//!
//! | 入力 | 解釈 |
//! |------|------|
//! | RFC 3339 | そのまま UTC に変換 |
//! | `2024-05-01T09:00:00`（オフセットなし） | UTC とみなす |
//! | `2024-05-01` | UTC の 0 時 |
//! | それ以外の文字列・数値など | 値なし |

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::IgnoredAny};

/// タイムスタンプを文字列化する
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    DateTime::<Utc>::deserialize(deserializer)
}

/// `Option<DateTime<Utc>>` 用。`None` は `null` として書き出す。
pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&super::format(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<DateTime<Utc>>::deserialize(deserializer)
    }
}

/// 文字列を可能な限りタイムスタンプとして解釈する
pub fn parse_lenient(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 読み込み専用。解釈できない値はエラーにせず `None` にする。
///
/// `#[serde(default, deserialize_with = "edgeblog_domain::timestamp::lenient::deserialize")]`
/// で使用する。
pub mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(IgnoredAny),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(text)) => super::parse_lenient(&text),
            Some(Raw::Other(_)) | None => None,
        })
    }
}
