//! smstrade response parsing
//!
//! The gateway answers with plain text, one value per line: status code,
//! message id, cost, message count. Lines the gateway leaves out read as -1.

use crate::error::SmsError;
use std::fmt;

/// Status code meaning the message was accepted
pub const STATUS_OK: i64 = 100;

/// Value used for a missing response line
pub const MISSING: i64 = -1;

/// Parsed gateway response
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    /// Status code (first line)
    pub code: i64,
    /// Cost in EUR (third line)
    pub cost: f64,
    /// Number of messages billed (fourth line)
    pub count: i64,
}

impl GatewayResponse {
    /// Parse a response body
    pub fn parse(body: &str) -> Result<Self, SmsError> {
        let lines: Vec<&str> = body.lines().collect();

        Ok(Self {
            code: field(&lines, 0, "status code")?.unwrap_or(MISSING),
            cost: field(&lines, 2, "cost")?.unwrap_or(MISSING as f64),
            count: field(&lines, 3, "count")?.unwrap_or(MISSING),
        })
    }

    /// Whether the gateway accepted the message
    pub fn is_success(&self) -> bool {
        self.code == STATUS_OK
    }

    /// Human-readable meaning of the status code
    pub fn description(&self) -> &'static str {
        status_description(self.code)
    }
}

impl fmt::Display for GatewayResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "response code {} (cost: {}, count: {})",
            self.code, self.cost, self.count
        )
    }
}

fn field<T: std::str::FromStr>(
    lines: &[&str],
    index: usize,
    name: &str,
) -> Result<Option<T>, SmsError> {
    let Some(line) = lines.get(index) else {
        return Ok(None);
    };
    let line = line.trim();
    line.parse()
        .map(Some)
        .map_err(|_| SmsError::Protocol(format!("{} '{}' is not a number", name, line)))
}

/// Meaning of an smstrade status code
pub fn status_description(code: i64) -> &'static str {
    match code {
        10 => "recipient number not valid",
        20 => "sender id not valid",
        30 => "message text not valid",
        31 => "message type not valid",
        40 => "route not valid",
        50 => "identification failed",
        60 => "insufficient balance",
        70 => "network not covered by route",
        71 => "feature not available on route",
        80 => "hand-over to SMSC failed",
        STATUS_OK => "SMS sent",
        MISSING => "no status in response",
        _ => "unknown status code",
    }
}
