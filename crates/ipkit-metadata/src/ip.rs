//! IP-level metadata record

use ipkit_core::{IpkitError, Result};
use serde::{Deserialize, Serialize};

/// A single key/value attribute attached to an IP record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAttribute {
    pub key: String,
    pub value: String,
}

/// Protocol-level metadata describing the IP itself.
///
/// `title` and `description` are required. The watermark image and the
/// attribute list are optional and are omitted entirely from the
/// serialized form when absent, so two records with the same required
/// fields serialize identically regardless of how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpMetadata {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark_img: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<IpAttribute>,
}

impl IpMetadata {
    /// Build an IP metadata record, rejecting empty required fields
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let description = description.into();

        if title.trim().is_empty() {
            return Err(IpkitError::ValidationError(
                "IP metadata is missing required field: title".to_string(),
            ));
        }
        if description.trim().is_empty() {
            return Err(IpkitError::ValidationError(
                "IP metadata is missing required field: description".to_string(),
            ));
        }

        Ok(Self {
            title,
            description,
            watermark_img: None,
            attributes: Vec::new(),
        })
    }

    /// Attach a watermark image URL
    pub fn with_watermark(mut self, url: impl Into<String>) -> Self {
        self.watermark_img = Some(url.into());
        self
    }

    /// Append a key/value attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(IpAttribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }
}
