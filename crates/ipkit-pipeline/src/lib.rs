//! ipkit Pipeline - metadata pinning and IP Asset registration
//!
//! Provides a pluggable provider framework for pinning metadata records to
//! a remote content-addressed store and anchoring them as IP Assets on a
//! remote ledger gateway, with strategy selection between minting on an
//! existing collection and creating a fresh one.

pub mod config;
pub mod ledger;
pub mod pin;
pub mod pipeline;
pub mod providers;
pub mod strategy;
pub mod terms;

pub use config::{ClientConfig, RetryPolicy};
pub use ledger::{
    CollectionSpec, LedgerClient, MetadataRefs, MintAndRegisterRequest, RegisterRequest,
    RegistrationReceipt, TxOptions,
};
pub use pin::{pin_record, PinProvider, PinStatus, PinnedContent};
pub use pipeline::{PinnedPair, RegistrationOutcome, RegistrationPipeline};
pub use providers::{GatewayClient, MockLedger, MockPinProvider, PinataProvider};
pub use strategy::RegistrationStrategy;
pub use terms::LicenseTerms;
