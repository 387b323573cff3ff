//! # エラーレスポンスボディ
//!
//! 両サービスが返す JSON エラーボディ。
//!
//! ```json
//! { "error": "Post not found", "message": "No post found with slug: hello" }
//! ```
//!
//! `message` は補足説明、`details` は内部エラーの原因がある場合のみ出力する。

use serde::{Deserialize, Serialize};

/// JSON エラーボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error:   String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    /// `error` のみのボディを作成する
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error:   error.into(),
            message: None,
            details: None,
        }
    }

    /// 補足メッセージ付きのボディを作成する
    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error:   error.into(),
            message: Some(message.into()),
            details: None,
        }
    }

    /// 原因の詳細を付与する
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_messageがない場合はerrorのみ出力する() {
        let json = serde_json::to_value(ErrorBody::new("Unauthorized")).unwrap();

        assert_eq!(json, serde_json::json!({ "error": "Unauthorized" }));
    }

    #[test]
    fn test_messageがある場合は両方出力する() {
        let body = ErrorBody::with_message("Missing slug", "Slug is required for creating a new post");

        let json = serde_json::to_value(body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "error": "Missing slug",
                "message": "Slug is required for creating a new post"
            })
        );
    }

    #[test]
    fn test_detailsを付与できる() {
        let body = ErrorBody::with_message("Failed", "An error occurred").with_details("EOF");

        let json = serde_json::to_value(body).unwrap();

        assert_eq!(json["details"], "EOF");
    }
}
