//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to publish a post.
///
/// Fields are optional so that a missing field is reported as a validation
/// error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePostRequest {
    #[serde(default, alias = "title")]
    pub title: Option<String>,
    #[serde(default, alias = "content")]
    pub content: Option<String>,
}

/// A post as returned by `GET /api/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
}
