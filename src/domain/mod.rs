//! Domain models for zabbix-scripts
//!
//! Types are validated on construction (fail-fast pattern).

pub mod graph;
pub mod sms;

pub use graph::{GraphImage, GraphWindow};
pub use sms::{PhoneNumber, SmsText};
