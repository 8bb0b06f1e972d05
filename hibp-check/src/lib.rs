//! Command-line breach check against the Have I Been Pwned range API.
//!
//! Only the first 5 hex characters of the password's SHA1 digest leave the
//! machine; see [`hibp_range`] for the protocol.
//!
//! ```sh
//! hibp-check -p hunter2
//! hibp-check --hash 5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8
//! ```

pub mod error;

use hibp_range::{CredentialDigest, Lookup, RangeClient};

pub use error::Error;

/// Resolve the CLI input into a digest. Exactly one of a non-empty password
/// or a pre-computed hash is required.
pub fn digest_from_input(
    password: Option<&str>,
    hash: Option<&str>,
) -> Result<CredentialDigest, Error> {
    match (password.filter(|p| !p.is_empty()), hash) {
        (Some(_), Some(_)) => Err(Error::InvalidArgs),
        (Some(password), None) => Ok(CredentialDigest::hash(password)),
        (None, Some(hash)) => CredentialDigest::from_hex(hash.trim()).map_err(Error::InvalidHash),
        (None, None) => Err(Error::MissingPassword),
    }
}

/// Human-readable result line.
pub fn verdict(lookup: &Lookup) -> String {
    if lookup.found() {
        format!(
            "⚠️  Password hash (prefix: {}) was found in {} breach(es)",
            lookup.prefix, lookup.count
        )
    } else {
        format!("✅ Password hash (prefix: {}) not found in any known breach.", lookup.prefix)
    }
}

/// Run one check and return the verdict line to print.
pub async fn run(
    client: &RangeClient,
    password: Option<&str>,
    hash: Option<&str>,
) -> Result<String, Error> {
    let digest = digest_from_input(password, hash)?;
    tracing::debug!(prefix = digest.prefix(), "checking range");

    let lookup = client.check_digest(&digest).await.map_err(Error::Lookup)?;
    Ok(verdict(&lookup))
}
