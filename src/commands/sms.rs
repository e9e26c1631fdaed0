//! SMS alert command implementation
//!
//! Validates the alert arguments, resolves settings and submits the message
//! to the smstrade gateway.

use crate::cli::output::print_output;
use crate::cli::SmsCli;
use crate::config::{ConfigResolver, Settings};
use crate::domain::{PhoneNumber, SmsText};
use crate::error::{ArgumentError, Result, SmsError};
use crate::sms::{GatewayResponse, SmsGateway, SmsRequest};

/// Execute the SMS command
pub fn run_sms(cli: &SmsCli) -> Result<()> {
    if cli.show_config {
        let settings = ConfigResolver::for_host().resolve(&cli.sources())?;
        print_output(&settings, cli.format)?;
        return Ok(());
    }

    let (to, text) = validate_arguments(cli.recipient.as_deref(), cli.message.as_deref())?;
    let settings = ConfigResolver::for_host().resolve(&cli.sources())?;

    let gateway = SmsGateway::new(&settings.smstrade_api_url)?;
    send_sms(&settings, &gateway, to, text)?;
    Ok(())
}

/// Check recipient and message. The subject is not used.
pub fn validate_arguments(
    recipient: Option<&str>,
    message: Option<&str>,
) -> std::result::Result<(PhoneNumber, SmsText), ArgumentError> {
    let (Some(recipient), Some(message)) = (recipient, message) else {
        return Err(ArgumentError::MissingArguments);
    };

    let to = PhoneNumber::new(recipient)?;
    let text = SmsText::new(message)?;
    Ok((to, text))
}

/// Submit one SMS and log the outcome.
///
/// A gateway status other than success is an error.
pub fn send_sms(
    settings: &Settings,
    gateway: &SmsGateway,
    to: PhoneNumber,
    text: SmsText,
) -> Result<GatewayResponse> {
    if text.was_truncated() {
        log::warn!("Message cut to {} characters", SmsText::MAX_CHARS);
    }

    let request = SmsRequest::new(settings, to, text);
    if request.debug {
        log::debug!("Gateway debug mode on, message will not be delivered");
    }

    let response = gateway.send(&request)?;

    if response.is_success() {
        log::info!("SMS sent to {} with {}", request.to, response);
        Ok(response)
    } else {
        log::error!(
            "SMS sent to {} with {}: {}",
            request.to,
            response,
            response.description()
        );
        Err(SmsError::Rejected {
            code: response.code,
            description: response.description().to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::exit_codes;
    use httpmock::prelude::*;

    fn args(recipient: &str, message: &str) -> (PhoneNumber, SmsText) {
        validate_arguments(Some(recipient), Some(message)).unwrap()
    }

    #[test]
    fn test_validate_arguments() {
        let (to, text) = args("491701234567", "PROBLEM: ping loss");
        assert_eq!(to.as_str(), "491701234567");
        assert_eq!(text.as_str(), "PROBLEM: ping loss");
    }

    #[test]
    fn test_validate_arguments_errors() {
        assert_eq!(
            validate_arguments(Some("+49170"), Some("x")).unwrap_err(),
            ArgumentError::InvalidRecipient("+49170".to_string())
        );
        assert_eq!(
            validate_arguments(Some("49170"), Some("")).unwrap_err(),
            ArgumentError::EmptyMessage
        );
        assert_eq!(
            validate_arguments(None, Some("x")).unwrap_err(),
            ArgumentError::MissingArguments
        );
    }

    #[test]
    fn test_send_sms_truncates_and_succeeds() {
        let server = MockServer::start();
        let expected = format!("message={}", "a".repeat(160));
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/")
                .body_contains(expected.as_str())
                .body_contains("to=491701234567");
            then.status(200).body("100\n1\n0.075\n1\n");
        });

        let settings = Settings {
            smstrade_api_url: server.url("/"),
            ..Settings::defaults("h")
        };
        let gateway = SmsGateway::new(&settings.smstrade_api_url).unwrap();
        let (to, text) = args("491701234567", &"a".repeat(300));

        let response = send_sms(&settings, &gateway, to, text).unwrap();
        mock.assert();
        assert!(response.is_success());
    }

    #[test]
    fn test_send_sms_rejection_exits_nonzero() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/");
            then.status(200).body("60\n");
        });

        let settings = Settings {
            smstrade_api_url: server.url("/"),
            ..Settings::defaults("h")
        };
        let gateway = SmsGateway::new(&settings.smstrade_api_url).unwrap();
        let (to, text) = args("491701234567", "alert");

        let err = send_sms(&settings, &gateway, to, text).unwrap_err();
        match &err {
            AppError::Sms(SmsError::Rejected { code, description }) => {
                assert_eq!(*code, 60);
                assert_eq!(description, "insufficient balance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), exit_codes::EXIT_SMS_REJECTED);
    }
}
