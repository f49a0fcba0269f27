mod mail;

pub use mail::{
    DeliveryReceipt, DisabledMailer, IMailer, OutgoingEmail, SmtpMailer, StubMailer, StubMailerMode,
};
