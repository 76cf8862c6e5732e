//! Mock providers for offline use
//!
//! `MockPinProvider` derives deterministic content identifiers from the
//! document bytes; `MockLedger` answers ledger calls with receipts derived
//! from the request. Neither makes network calls.

use ipkit_core::{Address, ContentHash, IpAssetId, IpkitError, Result, TokenId, TxHash};
use std::cell::RefCell;

use crate::ledger::{
    CollectionSpec, LedgerClient, MintAndRegisterRequest, RegisterRequest, RegistrationReceipt,
    TxOptions,
};
use crate::pin::{PinProvider, PinStatus};

/// A mock pinning provider that derives identifiers locally
#[derive(Debug, Default)]
pub struct MockPinProvider {
    fail: bool,
}

impl MockPinProvider {
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// A provider whose every upload fails, for simulating outages
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl PinProvider for MockPinProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<PinStatus> {
        if self.fail {
            return Ok(PinStatus::Unavailable("simulated outage".to_string()));
        }
        Ok(PinStatus::Available)
    }

    fn pin_json(&self, _name: &str, content: &serde_json::Value) -> Result<String> {
        if self.fail {
            return Err(IpkitError::UploadError(
                "Simulated pinning outage".to_string(),
            ));
        }

        // Same bytes in, same identifier out
        let digest = ContentHash::from_bytes(content.to_string().as_bytes());
        Ok(format!("bafk{}", &digest.to_hex()[..40]))
    }
}

/// A mock ledger that records every call in invocation order
#[derive(Default)]
pub struct MockLedger {
    calls: RefCell<Vec<String>>,
    next_token: RefCell<u64>,
    fail_registration: bool,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose registration calls fail, for simulating reverts
    pub fn failing_registration() -> Self {
        Self {
            fail_registration: true,
            ..Self::default()
        }
    }

    /// Method names in the order they were invoked
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, method: &str) {
        self.calls.borrow_mut().push(method.to_string());
    }

    fn receipt_for(&self, seed: &str, opts: &TxOptions) -> RegistrationReceipt {
        let tx = ContentHash::from_bytes(format!("tx:{}", seed).as_bytes());
        let asset = ContentHash::from_bytes(format!("asset:{}", seed).as_bytes());
        RegistrationReceipt {
            tx_hash: TxHash::new(format!("0x{}", tx.to_hex())),
            asset_id: IpAssetId::new(format!("0x{}", &asset.to_hex()[..40])),
            confirmed: opts.wait_for_confirmation,
        }
    }
}

impl LedgerClient for MockLedger {
    fn mint_token(
        &self,
        _collection: &Address,
        _recipient: &Address,
        _token_uri: &str,
    ) -> Result<TokenId> {
        self.record("mint_token");
        let mut next = self.next_token.borrow_mut();
        *next += 1;
        Ok(TokenId::from_raw(*next))
    }

    fn create_collection(&self, spec: &CollectionSpec) -> Result<Address> {
        self.record("create_collection");
        let digest = ContentHash::from_bytes(spec.name.as_bytes());
        Address::parse(&format!("0x{}", &digest.to_hex()[..40])).ok_or_else(|| {
            IpkitError::CollectionCreationError("Derived malformed collection address".to_string())
        })
    }

    fn register_asset(
        &self,
        request: &RegisterRequest,
        opts: &TxOptions,
    ) -> Result<RegistrationReceipt> {
        self.record("register_asset");
        if self.fail_registration {
            return Err(IpkitError::RegistrationError(
                "Simulated contract revert".to_string(),
            ));
        }
        Ok(self.receipt_for(
            &format!("{}:{}", request.collection, request.token_id),
            opts,
        ))
    }

    fn mint_and_register_asset(
        &self,
        request: &MintAndRegisterRequest,
        opts: &TxOptions,
    ) -> Result<RegistrationReceipt> {
        self.record("mint_and_register_asset");
        if self.fail_registration {
            return Err(IpkitError::RegistrationError(
                "Simulated contract revert".to_string(),
            ));
        }
        let mut next = self.next_token.borrow_mut();
        *next += 1;
        Ok(self.receipt_for(&format!("{}:{}", request.collection, *next), opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mock_pin_deterministic() {
        let provider = MockPinProvider::new();
        let doc = json!({"a": 1, "b": 2});
        let first = provider.pin_json("doc", &doc).unwrap();
        let second = provider.pin_json("doc", &doc).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("bafk"));
    }

    #[test]
    fn test_mock_pin_health() {
        assert_eq!(
            MockPinProvider::new().health_check().unwrap(),
            PinStatus::Available
        );
        assert!(matches!(
            MockPinProvider::failing().health_check().unwrap(),
            PinStatus::Unavailable(_)
        ));
    }

    #[test]
    fn test_mock_ledger_mints_sequential_token_ids() {
        let ledger = MockLedger::new();
        let collection = Address::parse("0x0000000000000000000000000000000000000001").unwrap();
        let recipient = Address::parse("0x0000000000000000000000000000000000000002").unwrap();

        let first = ledger.mint_token(&collection, &recipient, "ipfs://a").unwrap();
        let second = ledger.mint_token(&collection, &recipient, "ipfs://b").unwrap();
        assert_eq!(first.raw() + 1, second.raw());
    }

    #[test]
    fn test_mock_ledger_collection_address_from_name() {
        let ledger = MockLedger::new();
        let fee = Address::parse("0x0000000000000000000000000000000000000003").unwrap();
        let spec = CollectionSpec::new("Test Collection", "TEST", fee);

        let a = ledger.create_collection(&spec).unwrap();
        let b = ledger.create_collection(&spec).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mock_ledger_records_calls() {
        let ledger = MockLedger::new();
        let fee = Address::parse("0x0000000000000000000000000000000000000003").unwrap();
        ledger
            .create_collection(&CollectionSpec::new("C", "C", fee))
            .unwrap();
        assert_eq!(ledger.calls(), vec!["create_collection"]);
    }
}
