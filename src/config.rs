use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::client::HttpFileDepotClient;
use crate::error::Error;
use crate::validate::require_non_blank;

pub const DEFAULT_USER_AGENT: &str = concat!("filedepot/", env!("CARGO_PKG_VERSION"));

/// Connection settings of a [`HttpFileDepotClient`].
///
/// Deserializable so it can sit inside an application's own config file:
///
/// ```toml
/// [filedepot]
/// base_url = "http://localhost:8080"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub base_url: String,
    /// Whole-request timeout. `None` leaves it to the transport.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Config {
            base_url: base_url.into(),
            timeout_secs: None,
            connect_timeout_secs: None,
            user_agent: None,
        }
    }
}

pub struct ClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientBuilder {
            base_url: base_url.into(),
            timeout: None,
            connect_timeout: None,
            user_agent: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<HttpFileDepotClient, Error> {
        let base_url = parse_base_url(&self.base_url)?;

        let mut http = reqwest::Client::builder().user_agent(
            self.user_agent
                .as_deref()
                .unwrap_or(DEFAULT_USER_AGENT),
        );
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            http = http.connect_timeout(timeout);
        }

        Ok(HttpFileDepotClient::from_parts(http.build()?, base_url))
    }
}

impl From<&Config> for ClientBuilder {
    fn from(config: &Config) -> Self {
        ClientBuilder {
            base_url: config.base_url.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            connect_timeout: config.connect_timeout_secs.map(Duration::from_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, Error> {
    require_non_blank(base_url, "baseUrl")?;
    let url = Url::parse(base_url.trim())
        .map_err(|e| Error::InvalidArgument(format!("baseUrl is not a valid URL: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidArgument(format!(
            "baseUrl cannot be used as a base URL: {base_url}"
        )));
    }
    Ok(url)
}
