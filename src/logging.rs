//! Logger setup for the binaries
//!
//! Both tools log through the `log` facade. `zabbix-graph` runs from cron and
//! logs to stderr; `zabbix-smstrade` runs inside the Zabbix server and logs
//! to the system log, since nobody reads its stderr.

use log::LevelFilter;
use syslog::{BasicLogger, Facility, Formatter3164};

/// Where log records ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    Syslog,
}

fn level(verbose: bool, quiet_default: LevelFilter) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        quiet_default
    }
}

/// Log to stderr via env_logger (`RUST_LOG` still applies)
pub fn init_stderr(verbose: bool) -> LogTarget {
    let default = level(verbose, LevelFilter::Warn).to_string().to_lowercase();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
    LogTarget::Stderr
}

/// Log to the system log under `process`, falling back to stderr
pub fn init_syslog(process: &str, verbose: bool) -> LogTarget {
    let formatter = Formatter3164 {
        facility: Facility::LOG_USER,
        hostname: None,
        process: process.to_string(),
        pid: std::process::id(),
    };

    match syslog::unix(formatter) {
        Ok(logger) => {
            if log::set_boxed_logger(Box::new(BasicLogger::new(logger))).is_ok() {
                log::set_max_level(level(verbose, LevelFilter::Info));
                return LogTarget::Syslog;
            }
            init_stderr(verbose)
        }
        Err(e) => {
            let target = init_stderr(verbose);
            log::warn!("System log unavailable ({}), logging to stderr", e);
            target
        }
    }
}

/// Base name of the running executable, for the syslog tag
pub fn process_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(std::path::Path::new)
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
