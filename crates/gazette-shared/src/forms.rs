//! Form payloads - user-submitted data for comments, sharing and search.
//!
//! Every field defaults to an empty string so a missing key in the urlencoded
//! body surfaces as a validation error instead of a deserialization failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Payload for posting a comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(max = 80, message = "Name must be at most 80 characters"))]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[serde(default)]
    pub name: String,

    #[validate(email(message = "Enter a valid email address"))]
    #[serde(default)]
    pub email: String,

    #[validate(custom(function = "not_blank", message = "Comment body is required"))]
    #[serde(default)]
    pub body: String,
}

/// Payload for recommending a post to someone by email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailPostForm {
    #[validate(length(max = 25, message = "Name must be at most 25 characters"))]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[serde(default)]
    pub name: String,

    /// Sender address, echoed in the message subject.
    #[validate(email(message = "Enter a valid email address"))]
    #[serde(default)]
    pub email: String,

    /// Recipient address.
    #[validate(email(message = "Enter a valid recipient address"))]
    #[serde(default)]
    pub to: String,

    /// Optional note appended to the message body.
    #[serde(default)]
    pub comments: String,
}

/// Query-string payload for full-text search.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchForm {
    #[validate(custom(function = "not_blank", message = "Enter a search term"))]
    #[serde(default)]
    pub query: String,
}

/// Rejects values that are empty or whitespace-only.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flattens validation errors into `field -> messages` for template rendering.
///
/// Keys are sorted so templates render errors in a stable order.
pub fn errors_map(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_comment() -> CommentForm {
        CommentForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            body: "Great read!".to_string(),
        }
    }

    #[test]
    fn valid_comment_passes() {
        assert!(valid_comment().validate().is_ok());
    }

    #[test]
    fn blank_comment_fields_are_rejected() {
        let form = CommentForm {
            name: "   ".to_string(),
            email: "not-an-email".to_string(),
            body: String::new(),
        };

        let errors = form.validate().unwrap_err();
        let map = errors_map(&errors);
        assert!(map.contains_key("name"));
        assert!(map.contains_key("email"));
        assert!(map.contains_key("body"));
    }

    #[test]
    fn comment_name_has_max_length() {
        let mut form = valid_comment();
        form.name = "x".repeat(81);
        assert!(form.validate().is_err());

        form.name = "x".repeat(80);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn share_comments_are_optional() {
        let form = EmailPostForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            to: "luis@example.com".to_string(),
            comments: String::new(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn share_requires_valid_recipient() {
        let form = EmailPostForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            to: "nowhere".to_string(),
            comments: String::new(),
        };

        let errors = form.validate().unwrap_err();
        assert!(errors_map(&errors).contains_key("to"));
    }

    #[test]
    fn share_name_has_max_length() {
        let form = EmailPostForm {
            name: "x".repeat(26),
            email: "ana@example.com".to_string(),
            to: "luis@example.com".to_string(),
            comments: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn search_rejects_blank_query() {
        let form = SearchForm {
            query: "  ".to_string(),
        };
        assert!(form.validate().is_err());

        let form = SearchForm {
            query: "rust".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_form_keys_deserialize_as_blank() {
        let form: CommentForm = serde_json::from_str("{}").unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn error_messages_are_human_readable() {
        let form = SearchForm {
            query: String::new(),
        };
        let errors = form.validate().unwrap_err();
        let map = errors_map(&errors);
        assert_eq!(map["query"], vec!["Enter a search term".to_string()]);
    }
}
