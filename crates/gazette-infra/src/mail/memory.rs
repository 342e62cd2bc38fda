//! In-memory mail backend - records messages instead of sending them.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use gazette_core::error::MailError;
use gazette_core::ports::{Mailer, OutgoingMail};

/// Stores outgoing mail in memory so tests can assert on what was sent.
#[derive(Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message handed to this backend so far.
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().expect("mailer lock poisoned").push(mail);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_sent_mail() {
        let mailer = MemoryMailer::new();
        mailer
            .send(OutgoingMail {
                to: "luis@example.com".to_owned(),
                subject: "Hi".to_owned(),
                body: "Read this".to_owned(),
            })
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Hi");
    }
}
