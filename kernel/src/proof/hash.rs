//! Canonical hashing: SHA-256 with domain separation.
//!
//! **Exactly one place defines canonical hashing.** Digest strings take the
//! form `"sha256:<lowercase_hex>"`.

use sha2::{Digest, Sha256};

pub use super::hash_domain::HashDomain;

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the format is invalid (missing colon,
    /// empty algorithm, or empty digest).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Compute the canonical hash of a byte slice with domain separation.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = DomainHasher::new(domain);
    hasher.update(data);
    hasher.finish()
}

/// Incremental form of [`canonical_hash`], for hashing a file in chunks.
///
/// `DomainHasher::new(d)` + `update(x)` + `finish()` equals
/// `canonical_hash(d, x)` for any split of `x` across `update` calls.
pub struct DomainHasher {
    inner: Sha256,
}

impl DomainHasher {
    #[must_use]
    pub fn new(domain: HashDomain) -> Self {
        let mut inner = Sha256::new();
        inner.update(domain.as_bytes());
        Self { inner }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    #[must_use]
    pub fn finish(self) -> ContentHash {
        let digest = self.inner.finalize();
        ContentHash {
            full: format!("sha256:{}", hex::encode(digest)),
            colon: "sha256".len(),
        }
    }
}
