//! Log-only mail backend - used when no SMTP relay is configured.

use async_trait::async_trait;

use gazette_core::error::MailError;
use gazette_core::ports::{Mailer, OutgoingMail};

use super::mask_email;

/// Writes outgoing mail to the log instead of delivering it.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        tracing::info!(
            to = %mask_email(&mail.to),
            subject = %mail.subject,
            body = %mail.body,
            "Outgoing mail (log backend)"
        );
        Ok(())
    }
}
