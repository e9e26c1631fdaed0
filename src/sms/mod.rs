//! smstrade.de HTTP gateway
//!
//! Submits an [`SmsRequest`] as a form post and parses the line-based answer.

pub mod request;
pub mod response;

pub use request::SmsRequest;
pub use response::{status_description, GatewayResponse};

use crate::error::SmsError;

use reqwest::blocking::Client;
use std::time::Duration;

/// Request timeout for the gateway call
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("zabbix-scripts/", env!("CARGO_PKG_VERSION"));

/// Client for the smstrade HTTP API
pub struct SmsGateway {
    client: Client,
    api_url: String,
}

impl SmsGateway {
    /// Create a gateway client for `api_url`
    pub fn new(api_url: &str) -> Result<Self, SmsError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SmsError::Http {
                url: api_url.to_string(),
                source: e,
            })?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
        })
    }

    /// Submit a message.
    ///
    /// Returns the parsed response whatever its status code; callers decide
    /// how to treat a rejection.
    pub fn send(&self, request: &SmsRequest) -> Result<GatewayResponse, SmsError> {
        let http_error = |e| SmsError::Http {
            url: self.api_url.clone(),
            source: e,
        };

        let response = self
            .client
            .post(&self.api_url)
            .form(&request.form())
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SmsError::Protocol(format!(
                "{} returned HTTP {}",
                self.api_url,
                status.as_u16()
            )));
        }

        let body = response.text().map_err(http_error)?;
        log::debug!("Gateway answered {:?}", body);
        GatewayResponse::parse(&body)
    }
}
