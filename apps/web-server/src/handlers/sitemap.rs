//! XML sitemap listing every published post.

use actix_web::{HttpResponse, web};

use gazette_core::domain::Post;

use crate::config::SiteConfig;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const CHANGEFREQ: &str = "weekly";
const PRIORITY: &str = "0.9";

/// GET /sitemap.xml
pub async fn sitemap(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.all_published().await?;
    let xml = build_sitemap(&state.site, &posts);

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(xml))
}

fn build_sitemap(site: &SiteConfig, posts: &[Post]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for post in posts {
        let loc = xml_escape(&site.absolute_url(&post.path()));
        let lastmod = post.updated_at.format("%Y-%m-%d");
        xml.push_str(&format!(
            "  <url>\n    <loc>{loc}</loc>\n    <lastmod>{lastmod}</lastmod>\n    \
             <changefreq>{CHANGEFREQ}</changefreq>\n    <priority>{PRIORITY}</priority>\n  </url>\n"
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn sitemap_lists_posts_with_fixed_changefreq_and_priority() {
        let site = SiteConfig {
            title: "My blog".to_string(),
            description: String::new(),
            base_url: "https://blog.example.com".to_string(),
        };

        let mut post = Post::new(
            Uuid::new_v4(),
            "Hello".to_string(),
            "hello".to_string(),
            "body".to_string(),
        );
        post.published_at = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        post.updated_at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap();

        let xml = build_sitemap(&site, &[post]);

        assert!(xml.contains("<loc>https://blog.example.com/2024/3/5/hello</loc>"));
        assert!(xml.contains("<lastmod>2024-04-01</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.9</priority>"));
    }

    #[test]
    fn empty_sitemap_is_still_valid() {
        let site = SiteConfig {
            title: String::new(),
            description: String::new(),
            base_url: "https://blog.example.com".to_string(),
        };
        let xml = build_sitemap(&site, &[]);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<urlset"));
        assert!(xml.ends_with("</urlset>\n"));
    }
}
