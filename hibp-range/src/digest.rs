use std::fmt;

use sha1::{Digest, Sha1};

use crate::error::Error;

/// The length of a SHA1 digest rendered as hex.
pub const DIGEST_LEN: usize = 40;

/// The length of the public prefix sent to the range API (5 hex characters).
pub const PREFIX_LEN: usize = 5;

/// The length of the private suffix that never leaves the process.
pub const SUFFIX_LEN: usize = DIGEST_LEN - PREFIX_LEN;

/// Lowercase hex lookup table.
pub const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// A SHA1 digest of a credential as 40 lowercase hex characters.
///
/// Only ever constructed through [`CredentialDigest::hash`] or the validating
/// [`CredentialDigest::from_hex`], so the hex invariant always holds and
/// [`prefix`](Self::prefix)/[`suffix`](Self::suffix) can slice without checks.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CredentialDigest([u8; DIGEST_LEN]);

impl CredentialDigest {
    /// Hashes the UTF-8 bytes of `credential`.
    pub fn hash(credential: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(credential.as_bytes());
        let hash: [u8; 20] = hasher.finalize().into();

        let mut hex = [0u8; DIGEST_LEN];
        for (i, byte) in hash.iter().enumerate() {
            hex[i * 2] = HEX_CHARS[(byte >> 4) as usize];
            hex[i * 2 + 1] = HEX_CHARS[(byte & 0x0f) as usize];
        }

        Self(hex)
    }

    /// Parses a pre-computed digest. Uppercase hex is accepted and lowercased.
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        if let Some(found) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(Error::InvalidDigestChar { found });
        }

        let bytes = hex.as_bytes();
        if bytes.len() != DIGEST_LEN {
            return Err(Error::InvalidDigestLength { len: bytes.len() });
        }

        let mut out = [0u8; DIGEST_LEN];
        for (dst, &c) in out.iter_mut().zip(bytes) {
            *dst = c.to_ascii_lowercase();
        }

        Ok(Self(out))
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: every byte is drawn from HEX_CHARS or is a lowercased ASCII hex digit
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    /// The first 5 hex characters, the only part sent to the range API.
    pub fn prefix(&self) -> &str {
        &self.as_str()[..PREFIX_LEN]
    }

    /// The remaining 35 hex characters.
    pub fn suffix(&self) -> &str {
        &self.as_str()[PREFIX_LEN..]
    }
}

impl fmt::Display for CredentialDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The full digest identifies the credential, keep it out of debug logs.
impl fmt::Debug for CredentialDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialDigest({}…)", self.prefix())
    }
}
