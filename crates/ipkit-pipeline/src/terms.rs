//! License terms attached at registration time

use ipkit_core::Address;
use serde::{Deserialize, Serialize};

/// Policy governing downstream use of a registered asset.
///
/// The default is the empty policy: nothing granted, no fee. The record is
/// forwarded to the ledger as-is; enforcement happens remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseTerms {
    #[serde(default)]
    pub transferable: bool,
    #[serde(default)]
    pub commercial_use: bool,
    #[serde(default)]
    pub derivatives_allowed: bool,
    /// Fee charged per mint, in the currency's smallest unit
    #[serde(default)]
    pub minting_fee: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Address>,
}
