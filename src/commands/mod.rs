//! Command handlers
//!
//! Each command handler orchestrates the execution of one binary.

pub mod graph;
pub mod sms;

pub use graph::run_graph;
pub use sms::run_sms;
