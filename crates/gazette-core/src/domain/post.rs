use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a post. Only published posts whose publish
/// timestamp is not in the future are visible to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

/// Post entity - a blog post with a markdown body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: PostStatus,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post. The publish timestamp starts at creation
    /// time and is adjusted when the post goes live.
    pub fn new(author_id: Uuid, title: String, slug: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            body,
            status: PostStatus::Draft,
            published_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical site path for the post: `/{year}/{month}/{day}/{slug}`,
    /// with unpadded date segments taken from the publish timestamp.
    pub fn path(&self) -> String {
        let date = self.published_at.date_naive();
        format!(
            "/{}/{}/{}/{}",
            date.year(),
            date.month(),
            date.day(),
            self.slug
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn path_uses_unpadded_publish_date() {
        let mut post = Post::new(
            Uuid::new_v4(),
            "Hello".to_owned(),
            "hello-world".to_owned(),
            "body".to_owned(),
        );
        post.published_at = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();

        assert_eq!(post.path(), "/2024/3/5/hello-world");
    }

    #[test]
    fn new_posts_start_as_drafts() {
        let post = Post::new(
            Uuid::new_v4(),
            "t".to_owned(),
            "t".to_owned(),
            "b".to_owned(),
        );
        assert_eq!(post.status, PostStatus::Draft);
    }
}
