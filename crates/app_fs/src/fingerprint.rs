//! Directory change detection
//!
//! A cheap content fingerprint used by the caller's polling loop to decide
//! whether a cached listing is stale, without a filesystem-event
//! subscription.

use crate::SCHEME;
use std::path::Path;
use xxhash_rust::xxh3::xxh3_64;

/// Sentinel for paths that are never fingerprinted (remote, missing, or
/// not a directory)
pub const REMOTE_FINGERPRINT: u64 = 0;

/// Fingerprint a local directory from its direct children's names and
/// byte lengths, in enumeration order.
///
/// The hash is order-sensitive: it follows whatever order `read_dir`
/// yields, which is stable on common filesystems but not guaranteed.
pub fn fingerprint(path: &str) -> u64 {
    if path.contains(SCHEME) {
        return REMOTE_FINGERPRINT;
    }

    let entries = match std::fs::read_dir(Path::new(path)) {
        Ok(entries) => entries,
        Err(_) => return REMOTE_FINGERPRINT,
    };

    let parts: Vec<String> = entries
        .flatten()
        .map(|entry| {
            let len = entry.metadata().map(|m| m.len()).unwrap_or(0);
            format!("{}{}", entry.file_name().to_string_lossy(), len)
        })
        .collect();

    xxh3_64(parts.join("|").as_bytes())
}
