//! Registration strategy selection

use ipkit_core::Address;

use crate::ledger::CollectionSpec;

/// How the pipeline anchors an IP Asset on the ledger.
///
/// Both variants end in a registered asset; they differ in where the
/// anchoring token comes from.
#[derive(Debug, Clone)]
pub enum RegistrationStrategy {
    /// Mint on an already-deployed collection, then register the minted
    /// token in a second transaction.
    MintThenRegister {
        collection: Address,
        recipient: Address,
    },
    /// Create a fresh minting-enabled collection, then mint and register
    /// in a single transaction. A failure in that transaction leaves no
    /// token minted.
    CreateCollectionAndRegister { collection: CollectionSpec },
}
