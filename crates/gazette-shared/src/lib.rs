//! # Gazette Shared
//!
//! Form payloads shared between the HTTP layer and the templates.
//! Validation rules live here so handlers and tests agree on them.

pub mod forms;

pub use forms::{errors_map, CommentForm, EmailPostForm, SearchForm};
