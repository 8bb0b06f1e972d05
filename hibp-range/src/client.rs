use std::time::Duration;

use crate::digest::CredentialDigest;
use crate::error::Error;
use crate::range::{RangeEntry, match_suffix, parse_range_body};

/// Public Pwned Passwords API.
pub const DEFAULT_BASE_URL: &str = "https://api.pwnedpasswords.com";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const HIBP_RANGE_URL_ENV: &str = "HIBP_RANGE_URL";

/// Upper bound on a single range request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Returns the base URL from the HIBP_RANGE_URL environment variable,
/// or falls back to the public API.
pub fn base_url_from_env() -> String {
    std::env::var(HIBP_RANGE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// The 5-character prefix that was sent to the range API.
    pub prefix: String,
    /// Number of times the credential appears in the corpus.
    pub count: u64,
}

impl Lookup {
    pub fn found(&self) -> bool {
        self.count > 0
    }
}

/// Client for the k-anonymity range endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RangeClient {
    http: reqwest::Client,
    base_url: String,
    padding: bool,
}

impl RangeClient {
    /// Client for the public API with the default timeout.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    pub fn builder() -> RangeClientBuilder {
        RangeClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every candidate sharing the digest's prefix.
    ///
    /// Only `digest.prefix()` is put on the wire. One request, no retries.
    pub async fn query(&self, digest: &CredentialDigest) -> Result<Vec<RangeEntry>, Error> {
        let prefix = digest.prefix();
        let url = format!("{}/range/{}", self.base_url, prefix);

        let mut request = self.http.get(&url);
        if self.padding {
            request = request.header("Add-Padding", "true");
        }

        let response = request
            .send()
            .await
            .map_err(|source| Error::Network { prefix: prefix.to_string(), source })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::Remote {
                prefix: prefix.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown status").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| Error::Read { prefix: prefix.to_string(), source })?;

        let entries = parse_range_body(&body);
        tracing::debug!(prefix, candidates = entries.len(), "range lookup complete");

        Ok(entries)
    }

    /// Query the range API and match the digest's suffix locally.
    pub async fn check_digest(&self, digest: &CredentialDigest) -> Result<Lookup, Error> {
        let entries = self.query(digest).await?;
        let count = match_suffix(digest, &entries);

        Ok(Lookup { prefix: digest.prefix().to_string(), count })
    }

    /// Hash `password` and check it. Empty passwords are rejected before any
    /// network traffic.
    pub async fn check_password(&self, password: &str) -> Result<Lookup, Error> {
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }

        self.check_digest(&CredentialDigest::hash(password)).await
    }
}

/// Builder for [`RangeClient`].
#[derive(Debug)]
pub struct RangeClientBuilder {
    base_url: String,
    timeout: Duration,
    padding: bool,
}

impl RangeClientBuilder {
    pub fn new() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: DEFAULT_TIMEOUT, padding: false }
    }

    /// Range endpoint root; requests go to `{base_url}/range/{prefix}`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ask the server to pad responses with zero-count decoy entries.
    pub fn padding(mut self, padding: bool) -> Self {
        self.padding = padding;
        self
    }

    pub fn build(self) -> Result<RangeClient, Error> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(RangeClient { http, base_url: self.base_url, padding: self.padding })
    }
}

impl Default for RangeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
