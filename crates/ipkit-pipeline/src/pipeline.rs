//! The sequential registration pipeline
//!
//! pin both metadata records, then mint (or create a collection) and
//! register. Each stage needs the previous stage's output, so the stages
//! run strictly in order and any failure aborts the remainder. Pinned
//! content is never unpinned on a later failure; it stays on the remote
//! store, and the staged API lets a caller resume from it.

use ipkit_core::{IpkitError, Result};
use ipkit_metadata::{IpMetadata, NftMetadata};

use crate::ledger::{
    LedgerClient, MetadataRefs, MintAndRegisterRequest, RegisterRequest, RegistrationReceipt,
    TxOptions,
};
use crate::pin::{pin_record, PinProvider, PinnedContent};
use crate::strategy::RegistrationStrategy;
use crate::terms::LicenseTerms;

const IP_METADATA_PIN_NAME: &str = "ip-metadata.json";
const NFT_METADATA_PIN_NAME: &str = "nft-metadata.json";

/// Both metadata records pinned, ready for registration.
///
/// Holding this value is what makes a manual resume possible: the pins
/// survive any later failure.
#[derive(Debug, Clone)]
pub struct PinnedPair {
    pub ip: PinnedContent,
    pub nft: PinnedContent,
}

impl PinnedPair {
    /// The references carried by both registration calls
    pub fn to_refs(&self) -> MetadataRefs {
        MetadataRefs {
            ip_metadata_uri: self.ip.uri.clone(),
            ip_metadata_hash: self.ip.hash,
            nft_metadata_uri: self.nft.uri.clone(),
            nft_metadata_hash: self.nft.hash,
        }
    }
}

/// Everything the full sequence produced
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub pinned: PinnedPair,
    pub receipt: RegistrationReceipt,
}

/// Drives the pin-then-register sequence against explicit backends.
///
/// Both backends are passed in; nothing here reads ambient state.
pub struct RegistrationPipeline<'a> {
    ledger: &'a dyn LedgerClient,
    pinner: &'a dyn PinProvider,
}

impl<'a> RegistrationPipeline<'a> {
    pub fn new(ledger: &'a dyn LedgerClient, pinner: &'a dyn PinProvider) -> Self {
        Self { ledger, pinner }
    }

    /// Pin the IP record, then the NFT record
    pub fn pin_metadata(&self, ip: &IpMetadata, nft: &NftMetadata) -> Result<PinnedPair> {
        let ip_pinned = pin_record(self.pinner, IP_METADATA_PIN_NAME, ip)?;
        let nft_pinned = pin_record(self.pinner, NFT_METADATA_PIN_NAME, nft)?;
        Ok(PinnedPair {
            ip: ip_pinned,
            nft: nft_pinned,
        })
    }

    /// Anchor pinned metadata on the ledger using the chosen strategy
    pub fn register(
        &self,
        strategy: &RegistrationStrategy,
        terms: &LicenseTerms,
        pinned: &PinnedPair,
        opts: &TxOptions,
    ) -> Result<RegistrationReceipt> {
        let metadata = pinned.to_refs();

        match strategy {
            RegistrationStrategy::MintThenRegister {
                collection,
                recipient,
            } => {
                let token_id = self
                    .ledger
                    .mint_token(collection, recipient, &pinned.nft.uri)?;
                let request = RegisterRequest {
                    collection: collection.clone(),
                    token_id,
                    terms: terms.clone(),
                    metadata,
                };
                self.ledger.register_asset(&request, opts)
            }
            RegistrationStrategy::CreateCollectionAndRegister { collection } => {
                let address = self.ledger.create_collection(collection)?;
                let request = MintAndRegisterRequest {
                    collection: address,
                    terms: terms.clone(),
                    metadata,
                };
                self.ledger.mint_and_register_asset(&request, opts)
            }
        }
    }

    /// Run the full sequence.
    ///
    /// When a ledger stage fails after pinning succeeded, the error names
    /// the identifiers that were already pinned so the caller can resume
    /// from `register` without re-uploading.
    pub fn run(
        &self,
        ip: &IpMetadata,
        nft: &NftMetadata,
        strategy: &RegistrationStrategy,
        terms: &LicenseTerms,
        opts: &TxOptions,
    ) -> Result<RegistrationOutcome> {
        let pinned = self.pin_metadata(ip, nft)?;
        match self.register(strategy, terms, &pinned, opts) {
            Ok(receipt) => Ok(RegistrationOutcome { pinned, receipt }),
            Err(err) => Err(annotate_pinned(err, &pinned)),
        }
    }
}

fn annotate_pinned(err: IpkitError, pinned: &PinnedPair) -> IpkitError {
    let note = format!(
        "(metadata already pinned: ip={}, nft={})",
        pinned.ip.cid, pinned.nft.cid
    );
    match err {
        IpkitError::MintError(msg) => IpkitError::MintError(format!("{} {}", msg, note)),
        IpkitError::CollectionCreationError(msg) => {
            IpkitError::CollectionCreationError(format!("{} {}", msg, note))
        }
        IpkitError::RegistrationError(msg) => {
            IpkitError::RegistrationError(format!("{} {}", msg, note))
        }
        other => other,
    }
}
