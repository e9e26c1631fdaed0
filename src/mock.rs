//! Mock implementations for testing
//!
//! Provides a mail transport that records messages instead of sending them.

use crate::error::MailError;
use crate::mail::MailTransport;

use lettre::Message;
use std::sync::Mutex;

/// Mail transport that keeps every delivered message in memory
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Vec<u8>>>,
    fail: bool,
}

impl RecordingTransport {
    /// Create a transport that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that rejects every message
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Raw RFC 5322 text of every accepted message
    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|raw| String::from_utf8_lossy(raw).into_owned())
            .collect()
    }
}

impl MailTransport for RecordingTransport {
    fn deliver(&self, message: &Message) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Delivery {
                server: "mock".to_string(),
                message: "550 rejected".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.formatted());
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
