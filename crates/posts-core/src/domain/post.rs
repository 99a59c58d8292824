use chrono::{DateTime, Utc};

/// Server-assigned post identifier.
pub type PostId = i64;

/// Post entity - a persisted, user-authored item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub image_url: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post that has not been stored yet and has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub content: String,
    pub image_url: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post stamped with the current time.
    pub fn new(content: String, image_url: Option<String>, author: String) -> Self {
        let now = Utc::now();
        Self {
            content,
            image_url,
            author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the id assigned by the store.
    pub fn with_id(self, id: PostId) -> Post {
        Post {
            id,
            content: self.content,
            image_url: self.image_url,
            author: self.author,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Externally mutable fields of a post. `None` leaves the field untouched.
///
/// `image_url` is three-state: `Some(None)` clears the stored URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub content: Option<String>,
    pub image_url: Option<Option<String>>,
    pub author: Option<String>,
}

impl Post {
    /// Apply changes and refresh `updated_at`.
    ///
    /// `id` and `created_at` are never touched. `updated_at` does not move
    /// backwards if the wall clock does.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(image_url) = changes.image_url {
            self.image_url = image_url;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        self.updated_at = Utc::now().max(self.updated_at).max(self.created_at);
    }
}
