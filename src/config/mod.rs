//! Configuration system
//!
//! Settings start from an explicit defaults table and are overlaid with
//! values from sectioned configuration files:
//!
//! 1. [`ConfigSources`] decides which files are candidates, in precedence order
//! 2. [`ConfigFile`] reads and merges them (later file wins per key)
//! 3. [`ConfigResolver`] coerces each known key into its declared type

pub mod file;
pub mod ini;
pub mod resolver;
pub mod value;

pub use file::{ConfigFile, ConfigSources};
pub use ini::IniDocument;
pub use resolver::ConfigResolver;

use serde::{Serialize, Serializer};

/// Section holding the frontend URL and credentials
pub const SECTION_ZABBIX: &str = "zabbix";
/// Section holding graph and mail report settings
pub const SECTION_GRAPH: &str = "zabbix_graph";
/// Section holding smstrade gateway settings
pub const SECTION_SMSTRADE: &str = "zabbix_smstrade";

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Base URL of the Zabbix web frontend
    pub zabbix_frontend_url: String,
    /// Frontend login name
    pub zabbix_username: String,
    /// Frontend password
    #[serde(serialize_with = "redacted")]
    pub zabbix_password: String,

    /// Graph image width in pixels
    pub graph_width: u32,
    /// Graph image height in pixels
    pub graph_height: u32,
    /// Time window covered by each graph, in seconds
    pub graph_period: u64,
    /// Graph ids as shown in the frontend URL
    pub graph_ids: Vec<String>,

    /// Envelope and header sender of the report mail
    pub smtp_from: String,
    /// Report recipients
    pub smtp_to: Vec<String>,
    /// Report subject line
    pub smtp_subject: String,
    /// SMTP relay, `host` or `host:port`
    pub smtp_server: String,

    /// smstrade HTTP API endpoint
    pub smstrade_api_url: String,
    /// smstrade API key
    #[serde(serialize_with = "redacted")]
    pub smstrade_key: String,
    /// smstrade route (`basic`, `gold`, ...)
    pub smstrade_route: String,
    /// Sender id; a non-empty value switches the route to `gold`
    pub smstrade_from: String,
    /// Gateway debug mode: messages are neither delivered nor billed
    pub smstrade_debug: bool,
}

impl Settings {
    /// The compiled-in defaults table
    pub fn defaults(fqdn: &str) -> Self {
        Self {
            zabbix_frontend_url: "https://example.com/zabbix".to_string(),
            zabbix_username: "zabbix_user".to_string(),
            zabbix_password: "zabbix_password".to_string(),

            graph_width: 600,
            graph_height: 200,
            graph_period: 60 * 60 * 24 * 7,
            graph_ids: ["1", "2", "3", "4"].map(String::from).to_vec(),

            smtp_from: format!("zabbix@{}", fqdn),
            smtp_to: vec!["recipient@example.com".to_string()],
            smtp_subject: "Zabbix Report".to_string(),
            smtp_server: "localhost".to_string(),

            smstrade_api_url: "https://gateway.smstrade.de".to_string(),
            smstrade_key: "abcd1234".to_string(),
            smstrade_route: "basic".to_string(),
            smstrade_from: String::new(),
            smstrade_debug: true,
        }
    }
}

fn redacted<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str("********")
    }
}

/// Fully-qualified name of this host, used for `%(fqdn)s` and the default sender
pub fn host_fqdn() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            log::warn!("Cannot determine host name ({}), using localhost", e);
            "localhost".to_string()
        }
    }
}
