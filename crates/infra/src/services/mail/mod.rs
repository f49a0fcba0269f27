mod smtp;

use anyhow::anyhow;
use std::sync::Mutex;

pub use smtp::SmtpMailer;

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Per-recipient outcome reported by the mail transport. The dispatcher
/// only trusts the `accepted` set, anything else counts as a failed send.
#[derive(Debug, Clone, Default)]
pub struct DeliveryReceipt {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
    pub message_id: Option<String>,
    pub response: String,
}

#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    /// Whether outbound credentials are configured. The dispatcher checks
    /// this before doing anything else so that no network attempt is made
    /// without them.
    fn is_configured(&self) -> bool {
        true
    }

    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<DeliveryReceipt>;
}

/// Mailer used when no SMTP credentials are configured
pub struct DisabledMailer;

#[async_trait::async_trait]
impl IMailer for DisabledMailer {
    fn is_configured(&self) -> bool {
        false
    }

    async fn send(&self, _email: &OutgoingEmail) -> anyhow::Result<DeliveryReceipt> {
        Err(anyhow!("SMTP credentials are not configured"))
    }
}

#[derive(Debug, Clone)]
pub enum StubMailerMode {
    /// Accept every recipient
    Accept,
    /// Report every recipient as rejected with the given transport detail
    Reject(String),
    /// Fail the whole transport call with the given error
    Error(String),
}

/// Recording mail transport for tests. Every attempt is pushed to the
/// outbox before the configured mode decides the outcome.
pub struct StubMailer {
    pub mode: Mutex<StubMailerMode>,
    pub outbox: Mutex<Vec<OutgoingEmail>>,
}

impl StubMailer {
    pub fn new() -> Self {
        Self {
            mode: Mutex::new(StubMailerMode::Accept),
            outbox: Mutex::new(vec![]),
        }
    }

    pub fn rejecting(detail: &str) -> Self {
        Self {
            mode: Mutex::new(StubMailerMode::Reject(detail.into())),
            ..Self::new()
        }
    }

    pub fn erroring(error: &str) -> Self {
        Self {
            mode: Mutex::new(StubMailerMode::Error(error.into())),
            ..Self::new()
        }
    }

    pub fn attempt_count(&self) -> usize {
        self.outbox.lock().unwrap().len()
    }
}

impl Default for StubMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for StubMailer {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<DeliveryReceipt> {
        let mut outbox = self.outbox.lock().unwrap();
        outbox.push(email.clone());
        let attempt = outbox.len();
        drop(outbox);

        match &*self.mode.lock().unwrap() {
            StubMailerMode::Accept => Ok(DeliveryReceipt {
                accepted: vec![email.to.clone()],
                message_id: Some(format!("<stub-{}@localhost>", attempt)),
                response: "250 Ok".into(),
                ..Default::default()
            }),
            StubMailerMode::Reject(detail) => Ok(DeliveryReceipt {
                rejected: vec![email.to.clone()],
                response: detail.clone(),
                ..Default::default()
            }),
            StubMailerMode::Error(error) => Err(anyhow!("{}", error)),
        }
    }
}
