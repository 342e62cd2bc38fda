//! Error handling - HTML error responses for a server-rendered site.
//!
//! Missing objects render the templated 404 page; internal failures render
//! a minimal 500 page without leaking detail.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tera::Context;

use gazette_core::error::{DomainError, MailError, RepoError};

use crate::templates;

/// Static fallback when the 404 template itself cannot be rendered.
const FALLBACK_404: &str =
    "<!DOCTYPE html><html><head><title>Page not found</title></head>\
     <body><h1>Page not found</h1><p>The page you requested does not exist.</p></body></html>";

const FALLBACK_500: &str =
    "<!DOCTYPE html><html><head><title>Server error</title></head>\
     <body><h1>Server error</h1><p>Something went wrong. Please try again later.</p></body></html>";

/// Application-level error type that converts to HTML responses.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Not found"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => not_found_response(),
            AppError::BadRequest(detail) => HttpResponse::BadRequest()
                .content_type("text/html; charset=utf-8")
                .body(format!(
                    "<!DOCTYPE html><html><body><h1>Bad request</h1><p>{}</p></body></html>",
                    tera::escape_html(detail)
                )),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                HttpResponse::InternalServerError()
                    .content_type("text/html; charset=utf-8")
                    .body(FALLBACK_500)
            }
        }
    }
}

/// The templated 404 page, with a static fallback if rendering fails.
pub fn not_found_response() -> HttpResponse {
    let body = templates::render("blog/errors/404.html", &Context::new()).unwrap_or_else(|e| {
        tracing::error!("Failed to render 404 template: {}", e);
        FALLBACK_404.to_string()
    });

    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound,
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound,
            RepoError::Constraint(msg) => AppError::BadRequest(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        tracing::error!("Mail error: {}", err);
        AppError::Internal("Mail delivery failed".to_string())
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Internal(format!("Template rendering failed: {}", err))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn domain_errors_map_to_the_matching_status() {
        let missing = AppError::from(DomainError::NotFound {
            entity_type: "post",
            id: Uuid::new_v4(),
        });
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(DomainError::Validation("name too long".to_string()));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let broken = AppError::from(DomainError::Internal("boom".to_string()));
        assert_eq!(broken.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn repo_not_found_maps_to_404() {
        let err = AppError::from(RepoError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn mail_errors_map_to_500() {
        let err = AppError::from(MailError::Transport("connection refused".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
