//! Pinning provider trait and the pin operation

use ipkit_core::{ContentHash, Result};
use ipkit_metadata::canonical_value;
use serde::Serialize;

/// Status returned by a pin provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinStatus {
    Available,
    Unavailable(String),
    NoAuthToken,
}

/// Trait implemented by each pinning backend (Pinata, Mock)
pub trait PinProvider: Send + std::fmt::Debug {
    /// Provider name (e.g. "pinata", "mock")
    fn name(&self) -> &str;

    /// Check if the provider is usable (auth token set, service reachable)
    fn health_check(&self) -> Result<PinStatus>;

    /// Upload a JSON document under a display name, returning the content
    /// identifier. The identifier is an opaque handle from the remote
    /// store and is not validated locally.
    fn pin_json(&self, name: &str, content: &serde_json::Value) -> Result<String>;
}

/// The outcome of pinning one metadata record
#[derive(Debug, Clone)]
pub struct PinnedContent {
    /// Content identifier returned by the provider
    pub cid: String,
    /// `ipfs://` retrieval URI derived from the identifier
    pub uri: String,
    /// SHA-256 over the canonical JSON bytes
    pub hash: ContentHash,
}

/// Canonicalize `record`, hash the exact serialized bytes, then upload.
///
/// The hash is computed before the upload from the canonical form, so it
/// never depends on how the provider stores or re-serializes the document.
pub fn pin_record<T: Serialize>(
    provider: &dyn PinProvider,
    name: &str,
    record: &T,
) -> Result<PinnedContent> {
    let value = canonical_value(record)?;
    let text = value.to_string();
    let hash = ContentHash::from_bytes(text.as_bytes());
    let cid = provider.pin_json(name, &value)?;

    Ok(PinnedContent {
        uri: format!("ipfs://{}", cid),
        cid,
        hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockPinProvider;
    use ipkit_core::IpkitError;
    use ipkit_metadata::IpMetadata;

    #[test]
    fn test_pin_is_idempotent_for_identical_records() {
        let provider = MockPinProvider::new();
        let record = IpMetadata::new("My IP Asset", "This is a test IP asset").unwrap();

        let first = pin_record(&provider, "ip-metadata", &record).unwrap();
        let second = pin_record(&provider, "ip-metadata", &record).unwrap();

        assert_eq!(first.cid, second.cid);
        assert_eq!(first.hash, second.hash);
        assert_eq!(first.uri, second.uri);
    }

    #[test]
    fn test_distinct_records_pin_distinctly() {
        let provider = MockPinProvider::new();
        let a = IpMetadata::new("Title", "First").unwrap();
        let b = IpMetadata::new("Title", "Second").unwrap();

        let pa = pin_record(&provider, "a", &a).unwrap();
        let pb = pin_record(&provider, "b", &b).unwrap();

        assert_ne!(pa.cid, pb.cid);
        assert_ne!(pa.hash, pb.hash);
    }

    #[test]
    fn test_uri_derives_from_cid() {
        let provider = MockPinProvider::new();
        let record = IpMetadata::new("Title", "Description").unwrap();
        let pinned = pin_record(&provider, "r", &record).unwrap();
        assert_eq!(pinned.uri, format!("ipfs://{}", pinned.cid));
    }

    #[test]
    fn test_provider_failure_surfaces_as_upload_error() {
        let provider = MockPinProvider::failing();
        let record = IpMetadata::new("Title", "Description").unwrap();
        let err = pin_record(&provider, "r", &record).unwrap_err();
        assert!(matches!(err, IpkitError::UploadError(_)));
    }

    #[test]
    fn test_hash_matches_canonical_bytes() {
        let provider = MockPinProvider::new();
        let record = IpMetadata::new("My IP Asset", "This is a test IP asset").unwrap();
        let pinned = pin_record(&provider, "r", &record).unwrap();
        assert_eq!(
            pinned.hash.to_hex(),
            "2bf87f1c8f6317e045f00ec45124a6f602296c2c8ad5eb50fe326529b7ff3088"
        );
    }
}
