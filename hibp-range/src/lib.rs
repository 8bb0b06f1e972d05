//! Breached password checker using the Have I Been Pwned range API.
//!
//! Passwords are never sent anywhere. The password is hashed with SHA1, and
//! only the first 5 hex characters of the digest go to the remote service,
//! which answers with every known suffix sharing that prefix along with its
//! breach count. The remaining 35 characters are matched locally.
//!
//! ```text
//! sha1("password") = 5baa6 1e4c9b93f3f0682250b6cf8331b7ee68fd8
//!                    prefix suffix
//!                    (sent) (matched locally)
//!
//! GET /range/5baa6
//! 003D68EB55068C33ACE09247EE4C639306B:3
//! 1E4C9B93F3F0682250B6CF8331B7EE68FD8:10434004
//! ...
//! ```
//!
//! # Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), hibp_range::Error> {
//! let client = hibp_range::RangeClient::new()?;
//! let lookup = client.check_password("password123").await?;
//! if lookup.found() {
//!     println!("seen {} times", lookup.count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod digest;
pub mod error;
pub mod range;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HIBP_RANGE_URL_ENV, Lookup, RangeClient,
    RangeClientBuilder, base_url_from_env,
};
pub use digest::{CredentialDigest, DIGEST_LEN, PREFIX_LEN, SUFFIX_LEN};
pub use error::Error;
pub use range::{RangeEntry, match_suffix, parse_range_body};
