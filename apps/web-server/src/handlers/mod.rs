//! HTTP handlers and route configuration.

mod feed;
mod health;
mod posts;
mod sitemap;


use actix_web::{HttpResponse, web};

use crate::middleware::error::not_found_response;

/// Configure all application routes.
///
/// The date-based detail route is registered last so fixed prefixes like
/// `/tag` and `/search` match first. Non-POST requests to the comment
/// resource get the resource default, a 405.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/feed", web::get().to(feed::atom_feed))
        .route("/sitemap.xml", web::get().to(sitemap::sitemap))
        .route("/search", web::get().to(posts::search))
        .route("/", web::get().to(posts::list))
        .route("/tag/{tag_slug}", web::get().to(posts::list_by_tag))
        .service(
            web::resource("/{post_id}/share")
                .route(web::get().to(posts::share_form))
                .route(web::post().to(posts::share_submit)),
        )
        .service(web::resource("/{post_id}/comment").route(web::post().to(posts::comment)))
        .route(
            "/{year}/{month}/{day}/{slug}",
            web::get().to(posts::detail),
        );
}

/// Fallback for unmatched routes: the templated 404 page.
pub async fn not_found() -> HttpResponse {
    not_found_response()
}
