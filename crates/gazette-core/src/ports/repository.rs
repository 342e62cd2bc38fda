use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, Comment, Post, Tag};
use crate::error::RepoError;
use crate::pagination::{Page, PageParam};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID, regardless of visibility.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity and return it as stored.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository. All `*_published` methods apply the visibility scope:
/// status = published and publish timestamp not in the future.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Fetch a published post by id (used by the share and comment routes).
    async fn published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Fetch the published post whose publish timestamp falls on the given
    /// UTC date and whose slug matches. An impossible date yields `None`.
    async fn published_by_date_and_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// One page of published posts, newest first, optionally restricted to
    /// posts carrying the given tag. The page number is clamped, never
    /// rejected; see [`crate::pagination`].
    async fn page_of_published(
        &self,
        tag_id: Option<Uuid>,
        page: PageParam,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError>;

    /// Published posts sharing at least one of `tag_ids` with the post
    /// identified by `post_id` (which is excluded), ordered by number of
    /// shared tags descending, then publish timestamp descending.
    async fn similar_published(
        &self,
        post_id: Uuid,
        tag_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Published posts ranked by weighted full-text relevance against
    /// `query`, best match first. Posts below the rank floor are omitted.
    async fn search_published(&self, query: &str, language: &str)
    -> Result<Vec<Post>, RepoError>;

    /// The most recently published posts, newest first.
    async fn latest_published(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Every published post, newest first (sitemap).
    async fn all_published(&self) -> Result<Vec<Post>, RepoError>;

    /// Number of published posts.
    async fn count_published(&self) -> Result<u64, RepoError>;

    /// Published posts ordered by total comment count descending. Posts
    /// without comments still qualify.
    async fn most_commented_published(&self, limit: u64) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Active comments for a post, oldest first.
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    async fn by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    /// Tags attached to a single post, by name.
    async fn for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    /// Tags for a batch of posts, keyed by post id. Posts without tags are
    /// absent from the map.
    async fn for_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Tag>>, RepoError>;
}

/// Author repository.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, Uuid> {
    /// Authors for a batch of posts, in no particular order.
    async fn by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError>;
}
