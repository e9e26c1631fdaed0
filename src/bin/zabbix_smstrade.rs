//! zabbix-smstrade - Zabbix alert script sending SMS via smstrade.de
//!
//! Install as a Zabbix media type script. Zabbix passes recipient, subject
//! and message; results are reported to the system log and the exit status.

use clap::Parser;
use std::process::ExitCode;
use zabbix_scripts::cli::output::print_error;
use zabbix_scripts::cli::SmsCli;
use zabbix_scripts::commands::run_sms;
use zabbix_scripts::exit_codes;
use zabbix_scripts::logging::{self, LogTarget};

fn main() -> ExitCode {
    let cli = SmsCli::parse();
    let target = logging::init_syslog(&logging::process_name(), cli.verbose);

    match run_sms(&cli) {
        Ok(()) => ExitCode::from(exit_codes::EXIT_SUCCESS),
        Err(e) => {
            if target == LogTarget::Syslog {
                log::error!("An error occurred: {}", e);
            }
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}
