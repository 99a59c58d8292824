//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Request to create a post.
///
/// Client-supplied `id`, `createdAt` and `updatedAt` are not part of the
/// request and are dropped during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub author: String,
}

/// Request to update a post. Omitted fields keep their stored value.
///
/// `imageUrl` distinguishes a missing key (`None`) from an explicit
/// `null` (`Some(None)`), which clears the stored URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Marks a key that is present in the body, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub content: String,
    pub image_url: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_ignores_server_fields() {
        let req: CreatePostRequest = serde_json::from_str(
            r#"{"id": 42, "content": "hi", "author": "bob", "createdAt": "2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(req.content, "hi");
        assert_eq!(req.author, "bob");
        assert_eq!(req.image_url, None);
    }

    #[test]
    fn test_update_request_tells_null_from_missing() {
        let cleared: UpdatePostRequest = serde_json::from_str(r#"{"imageUrl": null}"#).unwrap();
        assert_eq!(cleared.image_url, Some(None));

        let untouched: UpdatePostRequest = serde_json::from_str(r#"{"content": "bye"}"#).unwrap();
        assert_eq!(untouched.image_url, None);
        assert_eq!(untouched.content.as_deref(), Some("bye"));
    }

    #[test]
    fn test_post_response_uses_camel_case() {
        let now = Utc::now();
        let value = serde_json::to_value(PostResponse {
            id: 1,
            content: "hi".to_string(),
            image_url: None,
            author: "bob".to_string(),
            created_at: now,
            updated_at: now,
        })
        .unwrap();

        assert_eq!(value["id"], 1);
        assert!(value["imageUrl"].is_null());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("image_url").is_none());
    }
}
