use crate::digest::CredentialDigest;

/// One candidate returned by the range API for a queried prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEntry {
    /// The 35 hex characters after the prefix, as sent by the server.
    pub suffix: String,
    /// Breach count, `None` if the count field could not be parsed.
    pub count: Option<u64>,
}

/// Parse a range response body of `SUFFIX:COUNT` lines.
///
/// Empty lines and lines without a colon are dropped. A count that is not a
/// number is logged and kept as `None` so the rest of the body still gets
/// scanned.
pub fn parse_range_body(body: &str) -> Vec<RangeEntry> {
    let mut entries = Vec::with_capacity(body.len() / 40);

    for line in body.lines() {
        if line.is_empty() {
            continue;
        }

        let Some((suffix, count)) = line.split_once(':') else {
            tracing::debug!(line, "skipping range line without a colon");
            continue;
        };

        let count = match count.trim().parse::<u64>() {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!(count, error = %e, "failed to parse breach count");
                None
            }
        };

        entries.push(RangeEntry { suffix: suffix.to_string(), count });
    }

    entries
}

/// Returns the breach count of the first entry matching the digest's suffix,
/// or 0 if none does.
///
/// Linear scan in response order; the server does not promise sorted output.
/// Suffixes compare case-insensitively. Entries whose count failed to parse
/// are passed over.
pub fn match_suffix(digest: &CredentialDigest, entries: &[RangeEntry]) -> u64 {
    let suffix = digest.suffix();

    entries
        .iter()
        .filter(|entry| entry.suffix.eq_ignore_ascii_case(suffix))
        .find_map(|entry| entry.count)
        .unwrap_or(0)
}
