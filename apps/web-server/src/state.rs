//! Application state - shared across all handlers.

use std::sync::Arc;

use gazette_core::ports::{
    AuthorRepository, CommentRepository, Mailer, PostRepository, TagRepository,
};
use gazette_infra::database::DatabaseConnections;
use gazette_infra::mail::{LogMailer, SmtpMailer};
use gazette_infra::{
    PostgresAuthorRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository,
};

use crate::config::{AppConfig, SiteConfig};

/// Posts shown per listing page.
pub const POSTS_PER_PAGE: u64 = 3;

/// Posts included in the Atom feed.
pub const FEED_SIZE: u64 = 5;

/// Cap on the similar-posts list on a detail page.
pub const SIMILAR_POSTS: u64 = 4;

/// Entries in each sidebar aggregate list.
pub const SIDEBAR_POSTS: u64 = 5;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub site: SiteConfig,
    pub search_language: String,
}

impl AppState {
    /// Build the application state: connect the database pool and wire
    /// the repositories and the mail backend.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let connections = DatabaseConnections::init(&config.database)
            .await
            .map_err(|e| anyhow::anyhow!("failed to connect to database: {e}"))?;
        let db = connections.main;

        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => {
                tracing::info!(host = %smtp.host, "Using SMTP mail backend");
                Arc::new(SmtpMailer::new(smtp)?)
            }
            None => {
                tracing::warn!("SMTP_HOST not set. Outgoing mail goes to the log.");
                Arc::new(LogMailer)
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            authors: Arc::new(PostgresAuthorRepository::new(db)),
            mailer,
            site: config.site.clone(),
            search_language: config.search_language.clone(),
        })
    }
}
