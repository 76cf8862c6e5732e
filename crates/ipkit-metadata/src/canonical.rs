//! Canonical JSON serialization
//!
//! Content hashes are computed over serialized metadata, so hash
//! reproducibility depends on byte-identical output for the same logical
//! record. The rule fixed here: object keys sorted lexicographically at
//! every nesting level, compact separators, UTF-8. Records are routed
//! through `serde_json::Value`, whose map is BTreeMap-backed, which makes
//! the key ordering a property of the serializer rather than of field
//! declaration order. The `preserve_order` feature of serde_json must
//! stay off.

use ipkit_core::Result;
use serde::Serialize;

/// Convert a record into a sorted-key JSON value
pub fn canonical_value<T: Serialize>(record: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(record)?)
}

/// Serialize a record to its canonical JSON text
pub fn canonical_json<T: Serialize>(record: &T) -> Result<String> {
    canonical_value(record).map(|v| v.to_string())
}

/// Canonical JSON as bytes, the exact input to content hashing
pub fn canonical_bytes<T: Serialize>(record: &T) -> Result<Vec<u8>> {
    canonical_json(record).map(String::into_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::IpMetadata;
    use ipkit_core::ContentHash;
    use serde_json::json;

    #[test]
    fn test_keys_sorted_alphabetically() {
        let meta = IpMetadata::new("My IP Asset", "This is a test IP asset").unwrap();
        let text = canonical_json(&meta).unwrap();
        assert_eq!(
            text,
            r#"{"description":"This is a test IP asset","title":"My IP Asset"}"#
        );
    }

    #[test]
    fn test_golden_digest() {
        let meta = IpMetadata::new("My IP Asset", "This is a test IP asset").unwrap();
        let bytes = canonical_bytes(&meta).unwrap();
        let hash = ContentHash::from_bytes(&bytes);
        assert_eq!(
            hash.to_hex(),
            "2bf87f1c8f6317e045f00ec45124a6f602296c2c8ad5eb50fe326529b7ff3088"
        );
    }

    #[test]
    fn test_stable_under_insertion_order() {
        let a = json!({"title": "T", "description": "D", "extra": {"b": 1, "a": 2}});
        let b = json!({"extra": {"a": 2, "b": 1}, "description": "D", "title": "T"});
        assert_eq!(
            canonical_json(&a).unwrap(),
            canonical_json(&b).unwrap()
        );
    }

    #[test]
    fn test_no_extraneous_whitespace() {
        let meta = IpMetadata::new("T", "D").unwrap().with_attribute("k", "v");
        let text = canonical_json(&meta).unwrap();
        assert!(!text.contains(": "));
        assert!(!text.contains(", "));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_nested_objects_sorted() {
        let meta = IpMetadata::new("T", "D")
            .unwrap()
            .with_watermark("https://example.com/w.png")
            .with_attribute("medium", "oil");
        let text = canonical_json(&meta).unwrap();
        // Top-level key order: attributes < description < title < watermarkImg
        let order: Vec<usize> = ["\"attributes\"", "\"description\"", "\"title\"", "\"watermarkImg\""]
            .iter()
            .map(|k| text.find(*k).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        // Attribute entries sort their own keys too
        assert!(text.find("\"key\"").unwrap() < text.find("\"value\"").unwrap());
    }

    #[test]
    fn test_distinct_records_distinct_digests() {
        let a = IpMetadata::new("Title", "First description").unwrap();
        let b = IpMetadata::new("Title", "Second description").unwrap();
        let ha = ContentHash::from_bytes(&canonical_bytes(&a).unwrap());
        let hb = ContentHash::from_bytes(&canonical_bytes(&b).unwrap());
        assert_ne!(ha, hb);
    }
}
