//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod mailer;
mod repository;

pub use mailer::{Mailer, OutgoingMail};
pub use repository::{
    AuthorRepository, BaseRepository, CommentRepository, PostRepository, TagRepository,
};
