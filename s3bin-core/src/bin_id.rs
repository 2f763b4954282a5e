//! Bin identifier generation

use std::fmt;
use uuid::Uuid;

/// Identifier handed back to the caller for a stored bin.
///
/// Backed by a random (v4) UUID. There is no collision check: 122 random bits
/// make a clash between any two relays practically impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinId(Uuid);

impl BinId {
    /// Generate a fresh identifier from the OS entropy source
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Object key for this bin under `base_path`
    pub fn storage_key(&self, base_path: &str) -> String {
        join_key(base_path, &self.to_string())
    }
}

impl Default for BinId {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical hyphenated form, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`
impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Join a key prefix and a name into a single object key.
///
/// Empty and `.` segments are dropped, `..` removes the previous segment, and
/// a leading `/` on the prefix is kept. An empty prefix yields `name` alone.
pub fn join_key(prefix: &str, name: &str) -> String {
    let rooted = prefix.starts_with('/') || (prefix.is_empty() && name.starts_with('/'));
    let mut segments: Vec<&str> = Vec::new();

    for segment in prefix.split('/').chain(name.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else {
        joined
    }
}
