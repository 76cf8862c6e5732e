//! The consumed remote ledger surface
//!
//! Every operation here is a black-box network call: the ledger's signing,
//! contract execution and fee logic all live behind it. Implementations
//! only forward requests and observe results.

use ipkit_core::{Address, ContentHash, IpAssetId, Result, TokenId, TxHash};
use serde::{Deserialize, Serialize};

use crate::terms::LicenseTerms;

/// Parameters for creating a new minting-enabled collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSpec {
    pub name: String,
    pub symbol: String,
    pub public_minting: bool,
    pub fee_recipient: Address,
    /// Collection-level metadata URI; may be empty
    #[serde(default)]
    pub contract_uri: String,
}

impl CollectionSpec {
    /// A public-minting collection with an empty contract URI
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, fee_recipient: Address) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            public_minting: true,
            fee_recipient,
            contract_uri: String::new(),
        }
    }
}

/// Pinned metadata references carried by both registration calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRefs {
    pub ip_metadata_uri: String,
    pub ip_metadata_hash: ContentHash,
    pub nft_metadata_uri: String,
    pub nft_metadata_hash: ContentHash,
}

/// Register an already-minted token as an IP Asset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub collection: Address,
    pub token_id: TokenId,
    pub terms: LicenseTerms,
    #[serde(flatten)]
    pub metadata: MetadataRefs,
}

/// Mint a token and register it as an IP Asset in one ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintAndRegisterRequest {
    pub collection: Address,
    pub terms: LicenseTerms,
    #[serde(flatten)]
    pub metadata: MetadataRefs,
}

/// Caller preference for whether registration calls block until the
/// ledger confirms the transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxOptions {
    pub wait_for_confirmation: bool,
}

impl TxOptions {
    /// Block until the ledger confirms the transaction
    pub fn wait() -> Self {
        Self {
            wait_for_confirmation: true,
        }
    }

    /// Return as soon as the transaction is submitted
    pub fn fire_and_forget() -> Self {
        Self::default()
    }
}

/// Result of a registration call. Both identifiers are produced by the
/// remote ledger, not computed locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub tx_hash: TxHash,
    pub asset_id: IpAssetId,
    /// False when the call returned before ledger confirmation; the asset
    /// id may not be final until the transaction confirms.
    pub confirmed: bool,
}

/// Trait implemented by each ledger backend (Gateway, Mock)
pub trait LedgerClient: Send {
    /// Mint an NFT on an already-deployed collection, returning its token id
    fn mint_token(
        &self,
        collection: &Address,
        recipient: &Address,
        token_uri: &str,
    ) -> Result<TokenId>;

    /// Create a new minting-enabled collection, returning its address
    fn create_collection(&self, spec: &CollectionSpec) -> Result<Address>;

    /// Register an existing token as an IP Asset
    fn register_asset(
        &self,
        request: &RegisterRequest,
        opts: &TxOptions,
    ) -> Result<RegistrationReceipt>;

    /// Mint a token and register it as an IP Asset in a single transaction.
    /// A failure here leaves no token minted; atomicity is the ledger's,
    /// this client only forwards the request.
    fn mint_and_register_asset(
        &self,
        request: &MintAndRegisterRequest,
        opts: &TxOptions,
    ) -> Result<RegistrationReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(last: &str) -> Address {
        Address::parse(&format!("0x{}{}", "0".repeat(40 - last.len()), last)).unwrap()
    }

    #[test]
    fn test_register_request_flattens_metadata() {
        let hash = ContentHash::from_bytes(b"m");
        let req = RegisterRequest {
            collection: addr("a1"),
            token_id: TokenId::from_raw(7),
            terms: LicenseTerms::default(),
            metadata: MetadataRefs {
                ip_metadata_uri: "ipfs://QmIp".to_string(),
                ip_metadata_hash: hash,
                nft_metadata_uri: "ipfs://QmNft".to_string(),
                nft_metadata_hash: hash,
            },
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["tokenId"], 7);
        assert_eq!(value["ipMetadataUri"], "ipfs://QmIp");
        assert_eq!(value["ipMetadataHash"], hash.to_hex());
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_collection_spec_defaults() {
        let spec = CollectionSpec::new("Test Collection", "TEST", addr("b2"));
        assert!(spec.public_minting);
        assert!(spec.contract_uri.is_empty());
    }

    #[test]
    fn test_tx_options() {
        assert!(TxOptions::wait().wait_for_confirmation);
        assert!(!TxOptions::fire_and_forget().wait_for_confirmation);
        assert_eq!(TxOptions::default(), TxOptions::fire_and_forget());
    }
}
