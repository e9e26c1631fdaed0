//! zabbix-graph - mail Zabbix graphs as a report
//!
//! Fetches rendered graphs from the Zabbix web frontend and sends them as
//! PNG attachments. Run it from cron, optionally with a config file path.

use clap::Parser;
use std::process::ExitCode;
use zabbix_scripts::cli::output::print_error;
use zabbix_scripts::cli::GraphCli;
use zabbix_scripts::commands::run_graph;
use zabbix_scripts::exit_codes;
use zabbix_scripts::logging;

fn main() -> ExitCode {
    let cli = GraphCli::parse();
    logging::init_stderr(cli.verbose);

    match run_graph(&cli) {
        Ok(()) => ExitCode::from(exit_codes::EXIT_SUCCESS),
        Err(e) => {
            // The logger also writes to stderr, so report only once
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}
