//! CLI argument definitions using clap derive
//!
//! One parser per binary. Both accept the positional contract Zabbix and
//! cron jobs already use, plus a few optional flags.

use crate::config::ConfigSources;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Mail rendered Zabbix graphs as PNG attachments
///
/// Logs in to the Zabbix frontend, renders the configured graphs and sends
/// them to the configured recipients. Intended to run from cron.
#[derive(Parser, Debug)]
#[command(name = "zabbix-graph")]
#[command(author, version, about, long_about = None)]
pub struct GraphCli {
    /// Configuration file read after the system and user files
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Read only CONFIG and skip the system and user files
    #[arg(long)]
    pub only: bool,

    /// Print the resolved settings and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl GraphCli {
    /// Configuration sources selected by the arguments
    pub fn sources(&self) -> ConfigSources {
        if self.only {
            ConfigSources::single_path(self.config.clone())
        } else {
            ConfigSources::search_path(self.config.clone())
        }
    }
}

/// Send a Zabbix alert as SMS via smstrade.de
///
/// Zabbix calls alert scripts with recipient, subject and message. The
/// subject is ignored; the message is cut after 160 characters.
#[derive(Parser, Debug)]
#[command(name = "zabbix-smstrade")]
#[command(author, version, about, long_about = None)]
pub struct SmsCli {
    /// Recipient mobile number, digits only
    #[arg(required_unless_present = "show_config", allow_hyphen_values = true)]
    pub recipient: Option<String>,

    /// Alert subject (ignored)
    #[arg(required_unless_present = "show_config", allow_hyphen_values = true)]
    pub subject: Option<String>,

    /// Alert message, sent as SMS text
    #[arg(required_unless_present = "show_config", allow_hyphen_values = true)]
    pub message: Option<String>,

    /// Configuration file read after the system and user files
    #[arg(short, long, env = "ZABBIX_SCRIPT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the resolved settings and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl SmsCli {
    /// Configuration sources selected by the arguments
    pub fn sources(&self) -> ConfigSources {
        ConfigSources::search_path(self.config.clone())
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `section.key = value` lines
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
}
