#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid SHA1 hash: expected 40 characters, got {len}")]
    InvalidDigestLength { len: usize },

    #[error("Invalid SHA1 hash: {found:?} is not a hex character")]
    InvalidDigestChar { found: char },

    #[error("Password not provided")]
    EmptyPassword,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to make request for prefix {prefix}: {source}")]
    Network {
        prefix: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status}: {reason} (prefix {prefix})")]
    Remote { prefix: String, status: u16, reason: String },

    #[error("failed to read response for prefix {prefix}: {source}")]
    Read {
        prefix: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// True for failures caused by bad input rather than the remote service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidDigestLength { .. }
                | Error::InvalidDigestChar { .. }
                | Error::EmptyPassword
        )
    }
}
