//! SMS domain types
//!
//! Provides validated types for the recipient number and message text.

use crate::error::ArgumentError;
use std::fmt;

/// Recipient mobile number, digits only (no `+` prefix)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber with validation
    ///
    /// # Errors
    /// Returns `ArgumentError::InvalidRecipient` if the value is empty or
    /// contains anything but ASCII digits
    pub fn new(value: &str) -> Result<Self, ArgumentError> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ArgumentError::InvalidRecipient(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// The number as sent to the gateway
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message text limited to a single (non-concatenated) SMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsText {
    text: String,
    truncated: bool,
}

impl SmsText {
    /// Maximum characters in one SMS
    pub const MAX_CHARS: usize = 160;

    /// Create message text, cutting it after [`Self::MAX_CHARS`] characters
    ///
    /// # Errors
    /// Returns `ArgumentError::EmptyMessage` for an empty message
    pub fn new(value: &str) -> Result<Self, ArgumentError> {
        if value.is_empty() {
            return Err(ArgumentError::EmptyMessage);
        }

        let text: String = value.chars().take(Self::MAX_CHARS).collect();
        let truncated = text.len() < value.len();
        Ok(Self { text, truncated })
    }

    /// The (possibly truncated) text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the original message was longer than one SMS
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for SmsText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_valid() {
        let number = PhoneNumber::new("491701234567").unwrap();
        assert_eq!(number.as_str(), "491701234567");
        assert_eq!(number.to_string(), "491701234567");
    }

    #[test]
    fn test_phone_number_invalid() {
        for raw in ["", "+49170", "0170 123", "abc", "０１２"] {
            assert_eq!(
                PhoneNumber::new(raw),
                Err(ArgumentError::InvalidRecipient(raw.to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_sms_text_short() {
        let text = SmsText::new("Disk full on db1").unwrap();
        assert_eq!(text.as_str(), "Disk full on db1");
        assert!(!text.was_truncated());
    }

    #[test]
    fn test_sms_text_truncated_at_160_chars() {
        let long = "x".repeat(200);
        let text = SmsText::new(&long).unwrap();
        assert_eq!(text.as_str().len(), 160);
        assert!(text.was_truncated());

        let exact = "y".repeat(160);
        assert!(!SmsText::new(&exact).unwrap().was_truncated());
    }

    #[test]
    fn test_sms_text_counts_characters_not_bytes() {
        let long = "ä".repeat(170);
        let text = SmsText::new(&long).unwrap();
        assert_eq!(text.as_str().chars().count(), 160);
    }

    #[test]
    fn test_sms_text_empty() {
        assert_eq!(SmsText::new(""), Err(ArgumentError::EmptyMessage));
    }
}
