use super::{DeliveryReceipt, IMailer, OutgoingEmail};
use crate::config::SmtpSettings;
use anyhow::Context;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Mail transport backed by an SMTP relay, initialized once per process and
/// shared through the context
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> anyhow::Result<Self> {
        let credentials = Credentials::new(settings.username.clone(), settings.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.relay)
            .context("Invalid SMTP relay")?
            .port(settings.port)
            .credentials(credentials)
            .build();
        let from = settings
            .from
            .parse::<Mailbox>()
            .context("Invalid SMTP from address")?;

        Ok(Self { transport, from })
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<DeliveryReceipt> {
        let to = email
            .to
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid recipient address: {}", email.to))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())?;

        let response = self.transport.send(message).await?;

        let mut receipt = DeliveryReceipt {
            response: response.code().to_string(),
            ..Default::default()
        };
        if response.is_positive() {
            receipt.accepted.push(email.to.clone());
        } else {
            receipt.rejected.push(email.to.clone());
        }
        Ok(receipt)
    }
}
