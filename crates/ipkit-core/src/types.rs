//! Identifier newtypes shared across the pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// An EVM-style contract or account address: `0x` followed by 40 hex
/// characters, stored lowercase.
#[derive(Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse an address, normalizing to lowercase. Returns `None` if the
    /// string is not `0x` + 40 hex characters.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix("0x")?;
        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// Get the address as a `0x`-prefixed string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A token id within a collection contract
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl TokenId {
    /// Create a TokenId from a raw value
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque transaction hash produced by the remote ledger.
/// Not validated locally.
#[derive(Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque registered-asset identifier produced by the remote ledger.
/// Not validated locally.
#[derive(Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IpAssetId(String);

impl IpAssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for IpAssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IpAssetId({})", self.0)
    }
}

impl fmt::Display for IpAssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_valid() {
        let addr = Address::parse("0xAbCd000000000000000000000000000000001234").unwrap();
        assert_eq!(addr.as_str(), "0xabcd000000000000000000000000000000001234");
    }

    #[test]
    fn test_address_parse_rejects_bad_input() {
        assert!(Address::parse("abcd000000000000000000000000000000001234").is_none());
        assert!(Address::parse("0x1234").is_none());
        assert!(Address::parse("0xzzzz000000000000000000000000000000001234").is_none());
    }

    #[test]
    fn test_address_serde_transparent() {
        let addr = Address::parse("0x0000000000000000000000000000000000000001").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000001\"");
    }

    #[test]
    fn test_token_id_raw() {
        let id = TokenId::from_raw(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_opaque_ids() {
        let tx = TxHash::new("0xdeadbeef");
        assert!(!tx.is_empty());
        assert_eq!(tx.as_str(), "0xdeadbeef");

        let asset = IpAssetId::new("");
        assert!(asset.is_empty());
    }
}
