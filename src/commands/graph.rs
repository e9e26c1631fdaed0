//! Graph report command implementation
//!
//! Resolves settings, fetches every configured graph from the frontend and
//! mails them as one report.

use crate::cli::output::print_output;
use crate::cli::GraphCli;
use crate::config::{ConfigResolver, Settings};
use crate::domain::GraphWindow;
use crate::error::{FrontendError, Result};
use crate::frontend::FrontendSession;
use crate::mail::{MailTransport, ReportMail, SmtpMailer};

use chrono::{Local, NaiveDateTime};

/// What a report run delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    /// Graphs attached
    pub graphs: usize,
    /// Recipients addressed
    pub recipients: usize,
}

/// Execute the graph report command
pub fn run_graph(cli: &GraphCli) -> Result<()> {
    let settings = ConfigResolver::for_host().resolve(&cli.sources())?;

    if cli.show_config {
        print_output(&settings, cli.format)?;
        return Ok(());
    }

    let mailer = SmtpMailer::new(&settings.smtp_server)?;
    send_graph_report(&settings, Local::now().naive_local(), &mailer)?;
    Ok(())
}

/// Fetch the configured graphs and mail them through `transport`.
///
/// The session is logged out even when a graph fails; a failed logout is
/// only a warning.
pub fn send_graph_report<T: MailTransport>(
    settings: &Settings,
    now: NaiveDateTime,
    transport: &T,
) -> Result<ReportSummary> {
    let window = GraphWindow::from_settings(settings, now)?;
    // Validate addresses before touching the network
    let report = ReportMail::from_settings(settings)?;

    let session = FrontendSession::login(
        &settings.zabbix_frontend_url,
        &settings.zabbix_username,
        &settings.zabbix_password,
    )?;

    let images: std::result::Result<Vec<_>, FrontendError> = settings
        .graph_ids
        .iter()
        .map(|id| session.graph(id, &window))
        .collect();

    if let Err(e) = session.logout() {
        log::warn!("Logout failed: {}", e);
    }
    let images = images?;

    let message = report.build(&images)?;
    transport.deliver(&message)?;

    let summary = ReportSummary {
        graphs: images.len(),
        recipients: report.recipient_count(),
    };
    log::info!(
        "Sent {} graph(s) to {} recipient(s) via {}",
        summary.graphs,
        summary.recipients,
        transport.name()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, MailError};
    use crate::mock::RecordingTransport;
    use chrono::NaiveDate;
    use httpmock::prelude::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2011, 6, 15)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap()
    }

    fn settings(server: &MockServer) -> Settings {
        Settings {
            zabbix_frontend_url: server.base_url(),
            graph_ids: vec!["11".to_string(), "12".to_string()],
            smtp_to: vec!["ops@example.com".to_string()],
            ..Settings::defaults("mon.example.org")
        }
    }

    fn mock_login_logout(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
        let login = server.mock(|when, then| {
            when.method(POST)
                .path("/index.php")
                .body_contains("name=zabbix_user");
            then.status(200);
        });
        let logout = server.mock(|when, then| {
            when.method(POST)
                .path("/index.php")
                .body_contains("reconnect=1");
            then.status(200);
        });
        (login, logout)
    }

    #[test]
    fn test_report_sends_all_graphs() {
        let server = MockServer::start();
        let (login, logout) = mock_login_logout(&server);
        let chart = server.mock(|when, then| {
            when.method(POST)
                .path("/chart2.php")
                .body_contains("stime=20110608063000");
            then.status(200).body(PNG);
        });

        let transport = RecordingTransport::new();
        let summary = send_graph_report(&settings(&server), now(), &transport).unwrap();

        assert_eq!(
            summary,
            ReportSummary {
                graphs: 2,
                recipients: 1
            }
        );
        login.assert();
        chart.assert_hits(2);
        logout.assert();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("0.png"));
        assert!(sent[0].contains("1.png"));
        assert!(sent[0].contains("ops@example.com"));
    }

    #[test]
    fn test_failed_graph_still_logs_out() {
        let server = MockServer::start();
        let (_login, logout) = mock_login_logout(&server);
        server.mock(|when, then| {
            when.method(POST).path("/chart2.php");
            then.status(500);
        });

        let transport = RecordingTransport::new();
        let err = send_graph_report(&settings(&server), now(), &transport).unwrap_err();

        assert!(matches!(err, AppError::Frontend(FrontendError::Status { .. })));
        logout.assert();
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_invalid_recipient_fails_before_login() {
        let server = MockServer::start();
        let (login, _logout) = mock_login_logout(&server);

        let settings = Settings {
            smtp_to: vec!["broken address".to_string()],
            ..settings(&server)
        };
        let err = send_graph_report(&settings, now(), &RecordingTransport::new()).unwrap_err();

        assert!(matches!(err, AppError::Mail(MailError::InvalidAddress { .. })));
        login.assert_hits(0);
    }

    #[test]
    fn test_delivery_failure_is_mail_error() {
        let server = MockServer::start();
        mock_login_logout(&server);
        server.mock(|when, then| {
            when.method(POST).path("/chart2.php");
            then.status(200).body(PNG);
        });

        let err = send_graph_report(&settings(&server), now(), &RecordingTransport::failing())
            .unwrap_err();
        assert!(matches!(err, AppError::Mail(MailError::Delivery { .. })));
        assert_eq!(err.exit_code(), crate::exit_codes::EXIT_MAIL);
    }
}
