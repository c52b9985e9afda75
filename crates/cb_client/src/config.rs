use std::time::Duration;
use cb_core::{Error, Result};
use url::Url;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5222";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by the catalog and collection clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(server: &str) -> Result<Self> {
        Ok(Self {
            server: parse_base(server)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }
}

/// Parse an http(s) base URL. Trailing slashes are insignificant.
pub fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidUrl(format!("unsupported scheme '{}' in {}", other, raw))),
    }
}

/// Join a base URL and already-encoded path segments with single slashes.
pub(crate) fn join(base: &Url, segments: &[&str]) -> String {
    let mut out = base.as_str().trim_end_matches('/').to_string();
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}
