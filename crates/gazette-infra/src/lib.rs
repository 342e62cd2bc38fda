//! # Gazette Infrastructure
//!
//! Concrete implementations of the ports defined in `gazette-core`.
//! This crate contains the PostgreSQL persistence layer and the outgoing
//! mail backends.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, log/in-memory mail only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `smtp` - SMTP mail delivery via lettre

pub mod database;
pub mod mail;

pub use database::DatabaseConfig;
pub use mail::{LogMailer, MemoryMailer};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnections, PostgresAuthorRepository, PostgresCommentRepository,
    PostgresPostRepository, PostgresTagRepository,
};

#[cfg(feature = "smtp")]
pub use mail::{SmtpConfig, SmtpMailer};
