//! Unified error types for zabbix-scripts
//!
//! This module defines all error types used throughout the tools.
//! Uses thiserror for ergonomic error definitions.

use crate::exit_codes;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration loading/coercion
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line arguments
    #[error("Invalid argument: {0}")]
    Argument(#[from] ArgumentError),

    /// Error talking to the Zabbix web frontend
    #[error("Zabbix frontend error: {0}")]
    Frontend(#[from] FrontendError),

    /// Error building or delivering the report mail
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// Error from the SMS gateway
    #[error("SMS gateway error: {0}")]
    Sms(#[from] SmsError),

    /// IO error (stdout, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => exit_codes::EXIT_CONFIG,
            AppError::Argument(_) => exit_codes::EXIT_USAGE,
            AppError::Frontend(_) => exit_codes::EXIT_FRONTEND,
            AppError::Mail(_) => exit_codes::EXIT_MAIL,
            AppError::Sms(SmsError::Rejected { .. }) => exit_codes::EXIT_SMS_REJECTED,
            AppError::Sms(_) => exit_codes::EXIT_SMS_GATEWAY,
            AppError::Io(_) | AppError::Json(_) => exit_codes::EXIT_ERROR,
        }
    }
}

/// Errors from configuration resolution
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Cannot read configuration file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid sectioned key/value text
    #[error("Failed to parse {path} line {line}: {message}")]
    ParseError {
        path: String,
        line: usize,
        message: String,
    },

    /// A value could not be coerced into the setting's declared type
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// `%(name)s` substitution failed
    #[error("Bad interpolation in '{key}': {message}")]
    Interpolation { key: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(section: &str, key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: format!("{}.{}", section, key),
            message: message.into(),
        }
    }
}

/// Errors from command-line argument validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Recipient is not a plain digit string
    #[error("Invalid recipient phone number: '{0}' (digits only)")]
    InvalidRecipient(String),

    /// Message text is empty
    #[error("Invalid / empty message")]
    EmptyMessage,

    /// Recipient, subject and message were not all given
    #[error("Usage: zabbix-smstrade RECIPIENT SUBJECT MESSAGE")]
    MissingArguments,
}

/// Errors from the Zabbix web frontend session
#[derive(Error, Debug)]
pub enum FrontendError {
    /// HTTP transport failure
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Frontend answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Graph endpoint did not return an image
    #[error("graph {graph_id} is not a PNG image (got {content_type}); login may have failed")]
    NotAnImage {
        graph_id: String,
        content_type: String,
    },
}

/// Errors from mail assembly and delivery
#[derive(Error, Debug)]
pub enum MailError {
    /// Sender or recipient address is malformed
    #[error("invalid mail address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    /// `smtp_server` is not `host` or `host:port`
    #[error("invalid SMTP server '{0}' (expected host or host:port)")]
    InvalidServer(String),

    /// No recipients configured
    #[error("no mail recipients configured (smtp_to is empty)")]
    NoRecipients,

    /// Message could not be built
    #[error("failed to build message: {0}")]
    Build(String),

    /// SMTP delivery failed
    #[error("delivery via {server} failed: {message}")]
    Delivery { server: String, message: String },
}

/// Errors from the SMS gateway
#[derive(Error, Debug)]
pub enum SmsError {
    /// HTTP transport failure
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Gateway response does not follow the line protocol
    #[error("malformed gateway response: {0}")]
    Protocol(String),

    /// Gateway answered with a status code other than success
    #[error("gateway rejected message with code {code} ({description})")]
    Rejected { code: i64, description: String },
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
