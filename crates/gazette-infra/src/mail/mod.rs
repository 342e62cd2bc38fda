//! Outgoing mail backends - SMTP delivery, log-only, and in-memory.
//!
//! The log backend stands in when no SMTP relay is configured, so share
//! requests keep working in development.

mod log;
mod memory;

#[cfg(feature = "smtp")]
mod smtp;

pub use log::LogMailer;
pub use memory::MemoryMailer;

#[cfg(feature = "smtp")]
pub use smtp::{SmtpConfig, SmtpMailer};

/// Mask an email address for log output to keep PII out of logs.
pub(crate) fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let masked_local = if local.len() > 1 {
            format!("{}***", &local[..1])
        } else {
            "***".to_string()
        };
        format!("{}{}", masked_local, domain)
    } else {
        "***".to_string()
    }
}
