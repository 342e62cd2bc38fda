use async_trait::async_trait;

use crate::error::MailError;

/// A plain-text email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail transport port. Implementations deliver (or record) the message;
/// there is no retry and no delivery confirmation at this layer.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}
