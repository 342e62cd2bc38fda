//! Application configuration loaded from environment variables.

use std::env;

use gazette_infra::DatabaseConfig;
use gazette_infra::mail::SmtpConfig;

/// Site identity used in page headers, the feed and outgoing mail.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    /// Absolute URL the site is served from, without a trailing slash.
    pub base_url: String,
}

impl SiteConfig {
    /// Absolute URL for a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub site: SiteConfig,
    pub smtp: Option<SmtpConfig>,
    /// Postgres text-search configuration used for ranking, e.g. `spanish`.
    pub search_language: String,
}

impl AppConfig {
    /// Load configuration from environment variables. The blog cannot run
    /// without its post store, so a missing `DATABASE_URL` is an error
    /// rather than a degraded mode.
    pub fn from_env() -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        };

        let site = SiteConfig {
            title: env::var("SITE_TITLE").unwrap_or_else(|_| "My blog".to_string()),
            description: env::var("SITE_DESCRIPTION")
                .unwrap_or_else(|_| "New posts of my blog.".to_string()),
            base_url: env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string())
                .trim_end_matches('/')
                .to_string(),
        };

        // SMTP is optional; without it outgoing mail goes to the log.
        let smtp = env::var("SMTP_HOST").ok().map(|host| SmtpConfig {
            host,
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: env::var("SMTP_USERNAME").unwrap_or_default(),
            password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@localhost".to_string()),
        });

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            site,
            smtp,
            search_language: env::var("SEARCH_LANGUAGE").unwrap_or_else(|_| "spanish".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url_joins_base_and_path() {
        let site = SiteConfig {
            title: "My blog".to_string(),
            description: String::new(),
            base_url: "https://blog.example.com".to_string(),
        };
        assert_eq!(
            site.absolute_url("/2024/3/5/hello"),
            "https://blog.example.com/2024/3/5/hello"
        );
    }
}
