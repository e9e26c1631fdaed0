//! Mail delivery
//!
//! The [`MailTransport`] trait abstracts delivery so the report flow can be
//! tested without an SMTP server.

use crate::error::MailError;

use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;

/// Default SMTP port when `smtp_server` has none
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// SMTP command timeout
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for mail delivery channels
pub trait MailTransport {
    /// Deliver a message to its envelope recipients
    fn deliver(&self, message: &Message) -> Result<(), MailError>;

    /// Channel name for log messages
    fn name(&self) -> &str;
}

/// Plain SMTP relay without TLS or authentication, as on a local MTA
pub struct SmtpMailer {
    server: String,
    transport: SmtpTransport,
}

impl SmtpMailer {
    /// Create a mailer for `host` or `host:port`
    pub fn new(server: &str) -> Result<Self, MailError> {
        let (host, port) = split_host_port(server)?;
        let transport = SmtpTransport::builder_dangerous(host)
            .port(port)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            server: format!("{}:{}", host, port),
            transport,
        })
    }
}

impl MailTransport for SmtpMailer {
    fn deliver(&self, message: &Message) -> Result<(), MailError> {
        self.transport
            .send(message)
            .map_err(|e| MailError::Delivery {
                server: self.server.clone(),
                message: e.to_string(),
            })?;
        log::debug!("Mail accepted by {}", self.server);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.server
    }
}

/// Split `host[:port]`; a bracketed IPv6 literal keeps its colons
fn split_host_port(server: &str) -> Result<(&str, u16), MailError> {
    let server = server.trim();
    let invalid = || MailError::InvalidServer(server.to_string());

    let (host, port) = if let Some(rest) = server.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
        match tail.strip_prefix(':') {
            Some(port) => (host, Some(port)),
            None if tail.is_empty() => (host, None),
            None => return Err(invalid()),
        }
    } else {
        match server.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (server, None),
        }
    };

    if host.is_empty() {
        return Err(invalid());
    }

    let port = match port {
        Some(port) => port.parse().map_err(|_| invalid())?,
        None => DEFAULT_SMTP_PORT,
    };

    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("localhost").unwrap(), ("localhost", 25));
        assert_eq!(
            split_host_port("mail.example.com:2525").unwrap(),
            ("mail.example.com", 2525)
        );
        assert_eq!(split_host_port("[::1]:587").unwrap(), ("::1", 587));
        assert_eq!(split_host_port("[::1]").unwrap(), ("::1", 25));
    }

    #[test]
    fn test_split_host_port_invalid() {
        for server in ["", ":25", "host:port", "host:70000", "[::1", "[::1]x"] {
            assert!(
                matches!(split_host_port(server), Err(MailError::InvalidServer(_))),
                "{server}"
            );
        }
    }

    #[test]
    fn test_smtp_mailer_name() {
        let mailer = SmtpMailer::new("relay.example.com:2525").unwrap();
        assert_eq!(mailer.name(), "relay.example.com:2525");
    }
}
