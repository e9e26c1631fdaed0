//! Graph report mail
//!
//! Builds a `multipart/mixed` message: a short text part followed by one
//! `image/png` attachment per graph, named `0.png`, `1.png`, ...

pub mod transport;

pub use transport::{MailTransport, SmtpMailer};

use crate::config::Settings;
use crate::domain::GraphImage;
use crate::error::MailError;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;

/// Text body of the report mail
pub const REPORT_BODY: &str = "Zabbix Report";

/// Sender, recipients and subject of a report
#[derive(Debug, Clone)]
pub struct ReportMail {
    from: Mailbox,
    to: Vec<Mailbox>,
    subject: String,
}

impl ReportMail {
    /// Validate addresses from the settings
    pub fn from_settings(settings: &Settings) -> Result<Self, MailError> {
        let from = parse_mailbox(&settings.smtp_from)?;
        let to = settings
            .smtp_to
            .iter()
            .map(|addr| parse_mailbox(addr))
            .collect::<Result<Vec<_>, _>>()?;

        if to.is_empty() {
            return Err(MailError::NoRecipients);
        }

        Ok(Self {
            from,
            to,
            subject: settings.smtp_subject.clone(),
        })
    }

    /// Assemble the message with one attachment per image
    pub fn build(&self, images: &[GraphImage]) -> Result<Message, MailError> {
        let png = ContentType::parse("image/png").map_err(|e| MailError::Build(e.to_string()))?;

        let mut body = MultiPart::mixed().singlepart(SinglePart::plain(REPORT_BODY.to_string()));
        for (i, image) in images.iter().enumerate() {
            body = body.singlepart(
                Attachment::new(format!("{}.png", i)).body(image.data.clone(), png.clone()),
            );
        }

        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(self.subject.as_str())
            .date_now();
        for mailbox in &self.to {
            builder = builder.to(mailbox.clone());
        }

        builder
            .multipart(body)
            .map_err(|e| MailError::Build(e.to_string()))
    }

    /// Number of recipients
    pub fn recipient_count(&self) -> usize {
        self.to.len()
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress {
            address: address.to_string(),
            message: e.to_string(),
        })
}
