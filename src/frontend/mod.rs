//! Zabbix web frontend session
//!
//! Logs in with a form post, keeps the session cookie in the client's
//! cookie store, renders graphs through `chart2.php` and logs out again.
//! No API token or database access is needed, only a frontend user.

use crate::domain::{GraphImage, GraphWindow};
use crate::error::FrontendError;

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Request timeout for every frontend call
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("zabbix-scripts/", env!("CARGO_PKG_VERSION"));

/// Logged-in frontend session
pub struct FrontendSession {
    client: Client,
    base_url: String,
}

impl FrontendSession {
    /// Log in to the frontend at `base_url`
    pub fn login(base_url: &str, username: &str, password: &str) -> Result<Self, FrontendError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let url = format!("{}/index.php", base_url);

        let client = Client::builder()
            .cookie_store(true)
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FrontendError::Http {
                url: url.clone(),
                source: e,
            })?;

        let form = [
            ("form", "1"),
            ("form_refresh", "1"),
            ("name", username),
            ("password", password),
            ("enter", "Enter"),
        ];
        // Only the session cookie matters, the page itself is discarded
        post(&client, &url, &form)?;
        log::debug!("Logged in to {} as {}", base_url, username);

        Ok(Self { client, base_url })
    }

    /// Render one graph as PNG
    pub fn graph(&self, graph_id: &str, window: &GraphWindow) -> Result<GraphImage, FrontendError> {
        let url = format!("{}/chart2.php", self.base_url);
        let width = window.width.to_string();
        let height = window.height.to_string();
        let period = window.period.to_string();
        let form = [
            ("stime", window.start_time.as_str()),
            ("graphid", graph_id),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("period", period.as_str()),
        ];

        let response = post(&self.client, &url, &form)?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let data = response
            .bytes()
            .map_err(|e| FrontendError::Http {
                url: url.clone(),
                source: e,
            })?
            .to_vec();

        if !GraphImage::is_png(&data) {
            return Err(FrontendError::NotAnImage {
                graph_id: graph_id.to_string(),
                content_type,
            });
        }

        log::debug!("Fetched graph {} ({} bytes)", graph_id, data.len());
        Ok(GraphImage {
            graph_id: graph_id.to_string(),
            data,
        })
    }

    /// End the session
    pub fn logout(self) -> Result<(), FrontendError> {
        let url = format!("{}/index.php", self.base_url);
        post(&self.client, &url, &[("reconnect", "1")])?;
        log::debug!("Logged out of {}", self.base_url);
        Ok(())
    }

    /// Frontend base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn post(client: &Client, url: &str, form: &[(&str, &str)]) -> Result<Response, FrontendError> {
    let response = client
        .post(url)
        .form(form)
        .send()
        .map_err(|e| FrontendError::Http {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FrontendError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}
