//! zabbix-scripts - helper tools for a Zabbix installation
//!
//! `zabbix-graph` mails rendered frontend graphs as a report;
//! `zabbix-smstrade` delivers alert messages as SMS through smstrade.de.
//! Both share the layered configuration in [`config`].
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration resolution
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`frontend`]: Zabbix web frontend session
//! - [`mail`]: Report mail assembly and delivery
//! - [`sms`]: smstrade gateway client

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod exit_codes;
pub mod frontend;
pub mod logging;
pub mod mail;
pub mod sms;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
