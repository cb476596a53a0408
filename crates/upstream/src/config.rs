use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://imdb236.p.rapidapi.com";
pub const DEFAULT_HOST: &str = "imdb236.p.rapidapi.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the metadata provider, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Base URL without a trailing slash; upstream paths are appended verbatim.
    pub base_url: String,
    /// Sent as `x-rapidapi-host`.
    pub host: String,
    /// Sent as `x-rapidapi-key`.
    pub api_key: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            host: DEFAULT_HOST.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn trim_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
