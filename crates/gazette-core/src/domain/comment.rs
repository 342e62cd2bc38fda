use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reader comment attached to a single post.
///
/// Comments are created active and hidden by moderation flipping the
/// `active` flag off; this service never deactivates them itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new active comment on the given post.
    pub fn new(post_id: Uuid, name: String, email: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            name,
            email,
            body,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_comments_are_active() {
        let comment = Comment::new(
            Uuid::new_v4(),
            "Ada".to_owned(),
            "ada@example.com".to_owned(),
            "Nice post".to_owned(),
        );
        assert!(comment.active);
        assert_eq!(comment.created_at, comment.updated_at);
    }
}
