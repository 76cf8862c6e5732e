//! ipkit Metadata - typed metadata records and canonical serialization
//!
//! Two record variants flow through the registration pipeline: `IpMetadata`
//! describing the IP itself and `NftMetadata` describing the token that
//! anchors it. Both validate required fields at construction time. The
//! `canonical` module fixes the exact serialized form content hashes are
//! computed over.

pub mod canonical;
mod ip;
mod nft;

pub use canonical::{canonical_bytes, canonical_json, canonical_value};
pub use ip::{IpAttribute, IpMetadata};
pub use nft::NftMetadata;
