//! Wire types for the community and user endpoints.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// The backend's uniform wrapper around every payload.
///
/// When `is_success` is false the `result` must not be trusted, so it stays
/// optional and is only decoded into a concrete type after the flag check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    pub is_success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
}

/// One entry in the signed-in user's written-posts list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub post_id: u64,
    pub board_name: String,
    #[serde(default)]
    pub title: String,
    pub comment_count: u32,
    pub view_count: u32,
}

/// One search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub post_id: u64,
    pub board_name: String,
    #[serde(default)]
    pub menu: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub comment_count: u32,
    pub view_count: u32,
}

/// Search parameters. `menu` and `board_name` are sent as empty strings when
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub menu: Option<String>,
    pub board_name: Option<String>,
}

impl SearchQuery {
    pub fn keyword(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            ..Self::default()
        }
    }
}

/// Request payload for changing the signed-in user's password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Confirmation returned by the password endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChanged {
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tolerates_missing_result_and_unknown_fields() {
        let env: ResponseEnvelope<Vec<PostSummary>> =
            serde_json::from_str(r#"{"isSuccess":false,"code":"AUTH401","message":"expired"}"#).unwrap();
        assert!(!env.is_success);
        assert_eq!(env.message, "expired");
        assert!(env.result.is_none());
    }

    #[test]
    fn envelope_null_result_is_none() {
        let env: ResponseEnvelope<PasswordChanged> =
            serde_json::from_str(r#"{"isSuccess":true,"message":"ok","result":null}"#).unwrap();
        assert!(env.result.is_none());
    }

    #[test]
    fn post_summary_uses_camel_case() {
        let post: PostSummary = serde_json::from_str(
            r#"{"postId":7,"boardName":"Q&A","title":"hi","commentCount":2,"viewCount":10}"#,
        )
        .unwrap();
        assert_eq!(post.post_id, 7);
        assert_eq!(post.board_name, "Q&A");
        assert_eq!(post.view_count, 10);
    }

    #[test]
    fn change_password_serializes_camel_case() {
        let body = ChangePassword {
            current_password: "old".to_string(),
            new_password: "new".to_string(),
            confirm_password: "new".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["currentPassword"], "old");
        assert_eq!(json["confirmPassword"], "new");
    }
}
