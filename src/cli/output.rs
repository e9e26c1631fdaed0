//! Output formatting utilities
//!
//! Table and JSON rendering for `--show-config`, and error reports for
//! the terminal.

use crate::cli::args::OutputFormat;
use crate::config::{Settings, SECTION_GRAPH, SECTION_SMSTRADE, SECTION_ZABBIX};
use crate::error::{AppError, ArgumentError, ConfigError, FrontendError, Result};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_output(&mut handle, data, format)
}

/// Write output to any writer
pub fn write_output<W: Write, T: Serialize + TableDisplay>(
    out: &mut W,
    data: &T,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data)?;
            writeln!(out, "{}", json)?;
        }
    }

    Ok(())
}

/// Print an error and any hint for it to stderr
pub fn print_error(err: &AppError) {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    // Nothing left to report to if stderr is gone
    let _ = write_error(&mut handle, err);
}

/// Write an error report: one `Error:` line, then hints for common mistakes
pub fn write_error<W: Write>(out: &mut W, err: &AppError) -> io::Result<()> {
    writeln!(out, "Error: {}", err)?;

    match err {
        AppError::Config(ConfigError::InvalidValue { .. }) => {
            writeln!(out)?;
            writeln!(
                out,
                "Hint: list values look like [1, 2, 3] or ['a@example.com', 'b@example.com']."
            )?;
            writeln!(out, "      Run with --show-config to see the resolved settings.")?;
        }
        AppError::Frontend(FrontendError::NotAnImage { .. }) => {
            writeln!(out)?;
            writeln!(
                out,
                "Hint: check zabbix_username and zabbix_password in the [zabbix] section."
            )?;
        }
        AppError::Argument(ArgumentError::InvalidRecipient(_)) => {
            writeln!(
                out,
                "Hint: use the international number without '+', e.g. 491701234567."
            )?;
        }
        _ => {}
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;
}

impl TableDisplay for Settings {
    fn to_table(&self) -> String {
        let secret = |value: &str| {
            if value.is_empty() {
                String::new()
            } else {
                "********".to_string()
            }
        };

        let rows = [
            (SECTION_ZABBIX, "zabbix_frontend_url", self.zabbix_frontend_url.clone()),
            (SECTION_ZABBIX, "zabbix_username", self.zabbix_username.clone()),
            (SECTION_ZABBIX, "zabbix_password", secret(&self.zabbix_password)),
            (SECTION_GRAPH, "graph_width", self.graph_width.to_string()),
            (SECTION_GRAPH, "graph_height", self.graph_height.to_string()),
            (SECTION_GRAPH, "graph_period", self.graph_period.to_string()),
            (SECTION_GRAPH, "graph_ids", format_list(&self.graph_ids)),
            (SECTION_GRAPH, "smtp_from", self.smtp_from.clone()),
            (SECTION_GRAPH, "smtp_to", format_list(&self.smtp_to)),
            (SECTION_GRAPH, "smtp_subject", self.smtp_subject.clone()),
            (SECTION_GRAPH, "smtp_server", self.smtp_server.clone()),
            (SECTION_SMSTRADE, "smstrade_api_url", self.smstrade_api_url.clone()),
            (SECTION_SMSTRADE, "smstrade_key", secret(&self.smstrade_key)),
            (SECTION_SMSTRADE, "smstrade_route", self.smstrade_route.clone()),
            (SECTION_SMSTRADE, "smstrade_from", self.smstrade_from.clone()),
            (SECTION_SMSTRADE, "smstrade_debug", self.smstrade_debug.to_string()),
        ];

        rows.iter()
            .map(|(section, key, value)| format!("{}.{} = {}", section, key, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render a list in the bracketed form the configuration files accept
fn format_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{}'", item)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_table() {
        let table = Settings::defaults("mon.example.org").to_table();
        assert!(table.contains("zabbix_graph.graph_width = 600"));
        assert!(table.contains("zabbix_graph.graph_ids = ['1', '2', '3', '4']"));
        assert!(table.contains("zabbix_graph.smtp_from = zabbix@mon.example.org"));
        assert!(table.contains("zabbix.zabbix_password = ********"));
        assert!(table.contains("zabbix_smstrade.smstrade_debug = true"));
        assert!(!table.contains("abcd1234"));
        assert_eq!(table.lines().count(), 16);
    }

    #[test]
    fn test_settings_json() {
        let mut out = Vec::new();
        write_output(&mut out, &Settings::defaults("h"), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["graph_period"], 604_800);
        assert_eq!(json["smstrade_key"], "********");
    }

    #[test]
    fn test_error_report_is_written_once() {
        let err = AppError::from(ConfigError::invalid("zabbix_graph", "graph_width", "'wide'"));
        let mut out = Vec::new();
        write_error(&mut out, &err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Error:").count(), 1);
        assert!(text.contains("zabbix_graph.graph_width"));
        assert!(text.contains("--show-config"));
    }

    #[test]
    fn test_error_report_recipient_hint() {
        let err = AppError::from(ArgumentError::InvalidRecipient("+49170".to_string()));
        let mut out = Vec::new();
        write_error(&mut out, &err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Error: "));
        assert!(text.contains("without '+'"));
    }

    #[test]
    fn test_list_output_parses_back() {
        let items = vec!["ops@example.com".to_string(), "7".to_string()];
        let rendered = format_list(&items);
        assert_eq!(crate::config::value::parse_list(&rendered).unwrap(), items);
    }
}
