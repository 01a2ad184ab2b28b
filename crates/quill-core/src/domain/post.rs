use serde::{Deserialize, Serialize};

use crate::error::{DomainError, MISSING_FIELDS};

/// Id of the post inserted at startup when absent.
pub const SEED_POST_ID: i64 = 1;

/// Post entity - a single published blog entry.
///
/// Serialized with the column names of the `Posts` table (`Id`, `Title`, `Content`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// The post every fresh store starts with.
pub fn seed_post() -> Post {
    Post {
        id: SEED_POST_ID,
        title: "First Post".to_string(),
        content: "Hello from Turso!".to_string(),
    }
}

/// A validated, not yet persisted post. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
}

impl NewPost {
    /// Validate raw input. Both fields must be present and contain something other than whitespace.
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, DomainError> {
        match (title, content) {
            (Some(title), Some(content))
                if !title.trim().is_empty() && !content.trim().is_empty() =>
            {
                Ok(Self { title, content })
            }
            _ => Err(DomainError::InvalidInput(MISSING_FIELDS.to_string())),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Attach the store-assigned id.
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_accepts_non_blank_fields() {
        let post = NewPost::new(some("A"), some("B")).unwrap();
        assert_eq!(post.title(), "A");
        assert_eq!(post.content(), "B");
    }

    #[test]
    fn test_keeps_surrounding_whitespace() {
        let post = NewPost::new(some("  A "), some("B\n")).unwrap();
        assert_eq!(post.title(), "  A ");
        assert_eq!(post.content(), "B\n");
    }

    #[test]
    fn test_rejects_blank_or_missing_fields() {
        let cases = [
            (some(""), some("B")),
            (some("A"), some("")),
            (some("   "), some("B")),
            (some("A"), some("\t\n")),
            (None, some("B")),
            (some("A"), None),
        ];

        for (title, content) in cases {
            let err = NewPost::new(title, content).unwrap_err();
            match err {
                DomainError::InvalidInput(msg) => assert_eq!(msg, MISSING_FIELDS),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_post_serializes_with_column_names() {
        let json = serde_json::to_string(&seed_post()).unwrap();
        assert_eq!(
            json,
            r#"{"Id":1,"Title":"First Post","Content":"Hello from Turso!"}"#
        );
    }
}
