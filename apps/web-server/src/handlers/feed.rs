//! Atom feed of the latest published posts.

use actix_web::{HttpResponse, web};
use atom_syndication::{Entry, Feed, Link, Text};
use chrono::Utc;

use gazette_core::domain::Post;

use crate::config::SiteConfig;
use crate::markdown::{render_markdown, truncate_words};
use crate::middleware::error::{AppError, AppResult};
use crate::state::{AppState, FEED_SIZE};

/// Words kept of each rendered body in the entry summary.
const SUMMARY_WORDS: usize = 30;

/// GET /feed - the 5 most recent published posts as Atom.
pub async fn atom_feed(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.latest_published(FEED_SIZE).await?;
    let feed = build_feed(&state.site, &posts);

    let body = feed
        .write_to(Vec::new())
        .map_err(|e| AppError::Internal(format!("Failed to serialize feed: {e}")))?;

    Ok(HttpResponse::Ok()
        .content_type("application/atom+xml; charset=utf-8")
        .body(body))
}

fn build_feed(site: &SiteConfig, posts: &[Post]) -> Feed {
    Feed {
        title: Text::plain(site.title.clone()),
        id: site.base_url.clone(),
        updated: Utc::now().fixed_offset(),
        subtitle: Some(Text::plain(site.description.clone())),
        links: vec![Link {
            href: site.absolute_url("/"),
            rel: "alternate".to_string(),
            ..Link::default()
        }],
        entries: posts.iter().map(|post| entry(site, post)).collect(),
        ..Feed::default()
    }
}

fn entry(site: &SiteConfig, post: &Post) -> Entry {
    let url = site.absolute_url(&post.path());
    let summary = truncate_words(&render_markdown(&post.body), SUMMARY_WORDS);

    Entry {
        title: Text::plain(post.title.clone()),
        id: url.clone(),
        updated: post.published_at.fixed_offset(),
        published: Some(post.published_at.fixed_offset()),
        summary: Some(Text::plain(summary)),
        links: vec![Link {
            href: url,
            rel: "alternate".to_string(),
            ..Link::default()
        }],
        ..Entry::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn site() -> SiteConfig {
        SiteConfig {
            title: "My blog".to_string(),
            description: "New posts of my blog.".to_string(),
            base_url: "https://blog.example.com".to_string(),
        }
    }

    fn post(title: &str, slug: &str) -> Post {
        let mut post = Post::new(
            Uuid::new_v4(),
            title.to_string(),
            slug.to_string(),
            "Some **bold** text that goes on".to_string(),
        );
        post.published_at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        post
    }

    #[test]
    fn feed_carries_site_identity_and_entries() {
        let posts = vec![post("First", "first"), post("Second", "second")];
        let feed = build_feed(&site(), &posts);

        assert_eq!(feed.title.value, "My blog");
        assert_eq!(feed.entries.len(), 2);
        assert_eq!(feed.entries[0].title.value, "First");
        assert_eq!(
            feed.entries[0].links[0].href,
            "https://blog.example.com/2024/3/5/first"
        );
    }

    #[test]
    fn entry_summary_is_rendered_markdown() {
        let feed = build_feed(&site(), &[post("First", "first")]);
        let summary = feed.entries[0].summary.as_ref().unwrap();
        assert!(summary.value.contains("<strong>bold</strong>"));
    }

    #[test]
    fn feed_serializes_to_atom_xml() {
        let feed = build_feed(&site(), &[post("First", "first")]);
        let xml = String::from_utf8(feed.write_to(Vec::new()).unwrap()).unwrap();
        assert!(xml.contains("<feed"));
        assert!(xml.contains("First"));
    }
}
