//! View models and shared template context.
//!
//! Handlers turn domain entities into these serializable structs before
//! rendering; markdown stays raw here and is rendered by the `markdown`
//! template filter. Every HTML page also carries the sidebar aggregates
//! (post count, latest posts, most commented posts).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::Context;
use uuid::Uuid;

use gazette_core::domain::{Author, Comment, Post, Tag};
use gazette_core::pagination::Page;

use crate::middleware::error::AppResult;
use crate::state::{AppState, SIDEBAR_POSTS};

/// A tag as rendered in listings and on detail pages.
#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub name: String,
    pub url: String,
}

impl From<Tag> for TagView {
    fn from(tag: Tag) -> Self {
        Self {
            url: tag.path(),
            name: tag.name,
        }
    }
}

/// A post decorated with its author name and tags.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub author: String,
    pub published_at: String,
    /// Raw markdown; templates render it with the `markdown` filter.
    pub body: String,
    pub tags: Vec<TagView>,
}

impl PostView {
    pub fn new(post: Post, author_name: String, tags: Vec<Tag>) -> Self {
        Self {
            url: post.path(),
            id: post.id,
            title: post.title,
            author: author_name,
            published_at: display_date(post.published_at),
            body: post.body,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// A comment on a detail page.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub name: String,
    pub body: String,
    pub created_at: String,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            name: comment.name,
            body: comment.body,
            created_at: display_date(comment.created_at),
        }
    }
}

/// Pagination controls for the listing template.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationView {
    pub number: u64,
    pub num_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_number: Option<u64>,
    pub next_number: Option<u64>,
}

impl<T> From<&Page<T>> for PaginationView {
    fn from(page: &Page<T>) -> Self {
        Self {
            number: page.number,
            num_pages: page.num_pages,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            previous_number: page.previous_number(),
            next_number: page.next_number(),
        }
    }
}

/// A compact post reference for sidebar lists, similar-post lists and the
/// share/comment pages.
#[derive(Debug, Clone, Serialize)]
pub struct PostLink {
    pub id: Uuid,
    pub title: String,
    pub url: String,
}

impl From<Post> for PostLink {
    fn from(post: Post) -> Self {
        Self {
            url: post.path(),
            id: post.id,
            title: post.title,
        }
    }
}

/// Sidebar aggregates computed per request.
#[derive(Debug, Clone, Serialize)]
pub struct Sidebar {
    pub total_posts: u64,
    pub latest_posts: Vec<PostLink>,
    pub most_commented_posts: Vec<PostLink>,
}

fn display_date(ts: DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y").to_string()
}

/// Base context for every HTML page: site identity plus the sidebar.
pub async fn base_context(state: &AppState) -> AppResult<Context> {
    let total_posts = state.posts.count_published().await?;
    let latest = state.posts.latest_published(SIDEBAR_POSTS).await?;
    let most_commented = state.posts.most_commented_published(SIDEBAR_POSTS).await?;

    let sidebar = Sidebar {
        total_posts,
        latest_posts: latest.into_iter().map(Into::into).collect(),
        most_commented_posts: most_commented.into_iter().map(Into::into).collect(),
    };

    let mut context = Context::new();
    context.insert("site_title", &state.site.title);
    context.insert("site_description", &state.site.description);
    context.insert("sidebar", &sidebar);
    Ok(context)
}

/// Decorate a batch of posts with author names and tags, preserving order.
pub async fn post_views(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostView>> {
    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let mut tags_by_post = state.tags.for_posts(&post_ids).await?;
    let authors: HashMap<Uuid, Author> = state
        .authors
        .by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(posts
        .into_iter()
        .map(|post| {
            let author_name = authors
                .get(&post.author_id)
                .map(|a| a.name.clone())
                .unwrap_or_default();
            let tags = tags_by_post.remove(&post.id).unwrap_or_default();
            PostView::new(post, author_name, tags)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pagination_view_mirrors_page_navigation() {
        let page = Page {
            items: vec![1, 2, 3],
            number: 2,
            num_pages: 3,
            total: 7,
            per_page: 3,
        };
        let view = PaginationView::from(&page);
        assert_eq!(view.previous_number, Some(1));
        assert_eq!(view.next_number, Some(3));
        assert!(view.has_previous && view.has_next);
    }

    #[test]
    fn post_link_uses_canonical_path() {
        let mut post = Post::new(
            Uuid::new_v4(),
            "Hello".to_owned(),
            "hello".to_owned(),
            "body".to_owned(),
        );
        post.published_at = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();

        let link = PostLink::from(post);
        assert_eq!(link.url, "/2024/3/5/hello");
    }

    #[test]
    fn display_date_is_human_readable() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(display_date(ts), "March 5, 2024");
    }
}
