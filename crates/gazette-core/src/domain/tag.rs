use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - a label attached to posts, many-to-many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
        }
    }

    /// Site path of the tag-filtered post listing.
    pub fn path(&self) -> String {
        format!("/tag/{}", self.slug)
    }
}
