//! Graph report domain types

use crate::config::{Settings, SECTION_GRAPH};
use crate::error::ConfigError;
use chrono::{NaiveDateTime, TimeDelta};

/// Time stamp format expected by the frontend's `stime` parameter
pub const STIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// PNG file signature
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Size and time range of the graphs to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphWindow {
    /// Window start, formatted as [`STIME_FORMAT`]
    pub start_time: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Window length in seconds
    pub period: u64,
}

impl GraphWindow {
    /// Window ending at `now` and reaching back `period` seconds
    pub fn new(width: u32, height: u32, period: u64, now: NaiveDateTime) -> Result<Self, ConfigError> {
        let start = i64::try_from(period)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| now.checked_sub_signed(delta))
            .ok_or_else(|| {
                ConfigError::invalid(
                    SECTION_GRAPH,
                    "graph_period",
                    format!("{} seconds is out of range", period),
                )
            })?;

        Ok(Self {
            start_time: start.format(STIME_FORMAT).to_string(),
            width,
            height,
            period,
        })
    }

    /// Window described by the graph settings
    pub fn from_settings(settings: &Settings, now: NaiveDateTime) -> Result<Self, ConfigError> {
        Self::new(
            settings.graph_width,
            settings.graph_height,
            settings.graph_period,
            now,
        )
    }
}

/// A rendered graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphImage {
    /// Graph id it was rendered from
    pub graph_id: String,
    /// PNG bytes
    pub data: Vec<u8>,
}

impl GraphImage {
    /// Whether the data carries a PNG signature
    pub fn is_png(data: &[u8]) -> bool {
        data.starts_with(PNG_SIGNATURE)
    }
}
