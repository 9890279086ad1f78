// Content identifiers - hash-derived addresses of immutable nodes

use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of a content identifier in hex characters (SHA-256)
pub const CID_LEN: usize = 64;

/// Opaque, hash-derived address of an immutable node
///
/// Always stored as lowercase hex so two spellings of the same digest compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cid(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid content identifier: {0:?}")]
pub struct InvalidCid(pub String);

impl Cid {
    /// Hash a canonical node encoding into its identifier
    pub fn digest(encoded: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(encoded);
        Cid(format!("{:x}", hasher.finalize()))
    }

    /// Parse a user-supplied identifier
    pub fn parse(input: &str) -> Result<Self, InvalidCid> {
        if input.len() != CID_LEN || !input.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidCid(input.to_string()));
        }
        Ok(Cid(input.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cid {
    type Err = InvalidCid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cid::parse(s)
    }
}

impl AsRef<str> for Cid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable() {
        let a = Cid::digest(b"fnord");
        let b = Cid::digest(b"fnord");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), CID_LEN);
        assert_ne!(a, Cid::digest(b"fnord\n"));
    }

    #[test]
    fn test_parse_normalizes_case() {
        let cid = Cid::digest(b"x");
        let upper = cid.as_str().to_ascii_uppercase();
        assert_eq!(Cid::parse(&upper).unwrap(), cid);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Cid::parse("").is_err());
        assert!(Cid::parse("Qmfoo").is_err());
        assert!(Cid::parse(&"g".repeat(CID_LEN)).is_err());
        assert!(Cid::parse(&"a".repeat(CID_LEN + 1)).is_err());
    }
}
