//! smstrade request payload

use crate::config::Settings;
use crate::domain::{PhoneNumber, SmsText};

/// Route forced when a sender id is set
pub const SENDER_ID_ROUTE: &str = "gold";

/// One SMS submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsRequest {
    /// API key
    pub key: String,
    /// Recipient number
    pub to: PhoneNumber,
    /// Message text, already cut to one SMS
    pub message: SmsText,
    /// Delivery route
    pub route: String,
    /// Sender id, if any
    pub from: Option<String>,
    /// Ask the gateway not to deliver or bill the message
    pub debug: bool,
}

impl SmsRequest {
    /// Build the request from gateway settings.
    ///
    /// A non-empty `smstrade_from` switches the route to [`SENDER_ID_ROUTE`],
    /// the only route that carries a sender id.
    pub fn new(settings: &Settings, to: PhoneNumber, message: SmsText) -> Self {
        let from = Some(settings.smstrade_from.clone()).filter(|from| !from.is_empty());
        let route = if from.is_some() {
            SENDER_ID_ROUTE.to_string()
        } else {
            settings.smstrade_route.clone()
        };

        Self {
            key: settings.smstrade_key.clone(),
            to,
            message,
            route,
            from,
            debug: settings.smstrade_debug,
        }
    }

    /// Form fields in submission order
    pub fn form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("key", self.key.clone()),
            ("to", self.to.to_string()),
            ("message", self.message.to_string()),
            ("route", self.route.clone()),
            // Ask the gateway to report cost and message count
            ("cost", "1".to_string()),
            ("count", "1".to_string()),
        ];

        if let Some(from) = &self.from {
            form.push(("from", from.clone()));
        }
        if self.debug {
            form.push(("debug", "1".to_string()));
        }

        form
    }
}
