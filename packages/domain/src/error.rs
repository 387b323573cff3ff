//! # ドメイン層エラー定義
//!
//! 入力がレコード生成の前提を満たさない場合のエラー。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `MissingFields` | 400 Bad Request | 必須フィールドの欠落 |
//! | `MissingSlug` | 400 Bad Request | スラッグの欠落 |
//!
//! HTTP レスポンスへの変換は各サービスの責務。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 必須フィールドが欠落している
    ///
    /// 値が存在しない場合に加え、空文字列の場合も欠落として扱う。
    /// 保持する文字列は欠落しているフィールドの説明。
    #[error("必須フィールドがありません: {0}")]
    MissingFields(&'static str),

    /// スラッグが欠落している
    #[error("スラッグは必須です")]
    MissingSlug,
}

/// 値が存在し、かつ空文字列でない場合のみ `Some` を返す
///
/// 入力 JSON の「未指定」「null」「空文字列」を同一視するためのヘルパー。
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
