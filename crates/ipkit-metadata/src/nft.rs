//! NFT-level metadata record

use ipkit_core::{IpkitError, Result};
use serde::{Deserialize, Serialize};

/// Token-level metadata for the NFT anchoring an IP Asset.
///
/// All three fields are required; this is the record the token URI
/// resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
}

impl NftMetadata {
    /// Build an NFT metadata record, rejecting empty required fields
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let description = description.into();
        let image = image.into();

        for (field, value) in [
            ("name", &name),
            ("description", &description),
            ("image", &image),
        ] {
            if value.trim().is_empty() {
                return Err(IpkitError::ValidationError(format!(
                    "NFT metadata is missing required field: {}",
                    field
                )));
            }
        }

        Ok(Self {
            name,
            description,
            image,
        })
    }
}
