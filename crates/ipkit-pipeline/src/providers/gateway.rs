//! Ledger gateway client
//!
//! Speaks JSON over HTTP to a registration gateway that signs and submits
//! the actual ledger transactions. Registration calls return a pending
//! receipt immediately; when asked to wait, the client polls the
//! transaction status until the ledger reports it confirmed.

use ipkit_core::{Address, IpAssetId, IpkitError, Result, TokenId, TxHash};
use std::time::Duration;

use crate::config::{ClientConfig, RetryPolicy};
use crate::ledger::{
    CollectionSpec, LedgerClient, MintAndRegisterRequest, RegisterRequest, RegistrationReceipt,
    TxOptions,
};

const REQUEST_TIMEOUT_SECS: u64 = 60;
const POLL_INTERVAL_SECS: u64 = 5;
const MAX_POLL_ATTEMPTS: u32 = 60;

/// HTTP client for the registration gateway
#[derive(Debug)]
pub struct GatewayClient {
    account_key: String,
    gateway_url: String,
    chain_id: String,
    retry: RetryPolicy,
}

impl GatewayClient {
    /// Create a new GatewayClient from config.
    ///
    /// Construction only checks that the credential and endpoint are
    /// configured; an unreachable endpoint surfaces on the first call.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let account_key = config.require_account_key()?.to_string();
        let gateway_url = config
            .require_gateway_url()?
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            account_key,
            gateway_url,
            chain_id: config.network.chain_id.clone(),
            retry: config.retry.clone(),
        })
    }

    /// Poll the transaction status until the ledger confirms it
    fn await_confirmation(&self, tx_hash: &TxHash) -> std::result::Result<(), String> {
        let url = format!("{}/transactions/{}", self.gateway_url, tx_hash);

        for _ in 0..MAX_POLL_ATTEMPTS {
            let response = self.get_json(&url)?;
            match parse_tx_status(&response) {
                TxStatus::Confirmed => return Ok(()),
                TxStatus::Failed(msg) => {
                    return Err(format!("Transaction {} failed: {}", tx_hash, msg));
                }
                TxStatus::Pending => {
                    std::thread::sleep(Duration::from_secs(POLL_INTERVAL_SECS));
                }
            }
        }

        Err(format!(
            "Transaction {} not confirmed after {} polls",
            tx_hash, MAX_POLL_ATTEMPTS
        ))
    }

    fn submit(
        &self,
        url: &str,
        payload: &serde_json::Value,
        opts: &TxOptions,
    ) -> std::result::Result<RegistrationReceipt, String> {
        let response = self.post_json(url, payload)?;

        let mut receipt = parse_receipt_response(&response).ok_or_else(|| {
            format!(
                "Unexpected gateway registration response: {}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            )
        })?;

        if opts.wait_for_confirmation && !receipt.confirmed {
            self.await_confirmation(&receipt.tx_hash)?;
            receipt.confirmed = true;
        }

        Ok(receipt)
    }

    fn post_json(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let attempts = self.retry.max_attempts.max(1);
        for attempt in 0..attempts {
            let agent = build_agent();
            let response = agent
                .post(url)
                .header("Authorization", &format!("Bearer {}", self.account_key))
                .header("Content-Type", "application/json")
                .send_json(payload);

            match response {
                Ok(mut ok) => {
                    return ok
                        .body_mut()
                        .read_json()
                        .map_err(|e| format!("Failed to parse gateway response: {}", e));
                }
                Err(e) => {
                    if attempt + 1 < attempts && is_retryable_error(&e) {
                        sleep_backoff(self.retry.base_delay_ms, attempt);
                        continue;
                    }
                    return Err(format!("Gateway request failed: {}", e));
                }
            }
        }

        Err("Gateway request failed after retries".to_string())
    }

    fn get_json(&self, url: &str) -> std::result::Result<serde_json::Value, String> {
        let attempts = self.retry.max_attempts.max(1);
        for attempt in 0..attempts {
            let agent = build_agent();
            let response = agent
                .get(url)
                .header("Authorization", &format!("Bearer {}", self.account_key))
                .call();

            match response {
                Ok(mut ok) => {
                    return ok
                        .body_mut()
                        .read_json()
                        .map_err(|e| format!("Failed to parse gateway response: {}", e));
                }
                Err(e) => {
                    if attempt + 1 < attempts && is_retryable_error(&e) {
                        sleep_backoff(self.retry.base_delay_ms, attempt);
                        continue;
                    }
                    return Err(format!("Gateway poll failed: {}", e));
                }
            }
        }

        Err("Gateway poll failed after retries".to_string())
    }

    fn with_chain_id(&self, mut payload: serde_json::Value) -> serde_json::Value {
        payload["chainId"] = serde_json::json!(self.chain_id);
        payload
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

fn is_retryable_error(e: &ureq::Error) -> bool {
    match e {
        ureq::Error::Timeout(_)
        | ureq::Error::Io(_)
        | ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound => true,
        ureq::Error::StatusCode(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
        _ => false,
    }
}

fn sleep_backoff(base_delay_ms: u64, attempt: u32) {
    let delay_ms = base_delay_ms.saturating_mul(1u64 << attempt.min(16));
    std::thread::sleep(Duration::from_millis(delay_ms));
}

impl LedgerClient for GatewayClient {
    fn mint_token(
        &self,
        collection: &Address,
        recipient: &Address,
        token_uri: &str,
    ) -> Result<TokenId> {
        let url = format!("{}/collections/{}/tokens", self.gateway_url, collection);
        let payload = self.with_chain_id(serde_json::json!({
            "recipient": recipient,
            "tokenUri": token_uri,
        }));

        let response = self
            .post_json(&url, &payload)
            .map_err(IpkitError::MintError)?;

        parse_mint_response(&response).ok_or_else(|| {
            IpkitError::MintError(format!(
                "Unexpected gateway mint response: {}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            ))
        })
    }

    fn create_collection(&self, spec: &CollectionSpec) -> Result<Address> {
        let url = format!("{}/collections", self.gateway_url);
        let payload = self.with_chain_id(serde_json::to_value(spec)?);

        let response = self
            .post_json(&url, &payload)
            .map_err(IpkitError::CollectionCreationError)?;

        parse_collection_response(&response).ok_or_else(|| {
            IpkitError::CollectionCreationError(format!(
                "Unexpected gateway collection response: {}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            ))
        })
    }

    fn register_asset(
        &self,
        request: &RegisterRequest,
        opts: &TxOptions,
    ) -> Result<RegistrationReceipt> {
        let url = format!("{}/ip-assets/register", self.gateway_url);
        let payload = self.with_chain_id(serde_json::to_value(request)?);

        self.submit(&url, &payload, opts)
            .map_err(IpkitError::RegistrationError)
    }

    fn mint_and_register_asset(
        &self,
        request: &MintAndRegisterRequest,
        opts: &TxOptions,
    ) -> Result<RegistrationReceipt> {
        let url = format!("{}/ip-assets/mint-and-register", self.gateway_url);
        let payload = self.with_chain_id(serde_json::to_value(request)?);

        self.submit(&url, &payload, opts)
            .map_err(IpkitError::RegistrationError)
    }
}

/// Ledger-reported state of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed(String),
}

/// Extract the collection address from a gateway response
pub fn parse_collection_response(response: &serde_json::Value) -> Option<Address> {
    response
        .get("address")
        .and_then(|a| a.as_str())
        .and_then(Address::parse)
}

/// Extract the minted token id from a gateway response
pub fn parse_mint_response(response: &serde_json::Value) -> Option<TokenId> {
    response
        .get("tokenId")
        .and_then(|t| t.as_u64())
        .map(TokenId::from_raw)
}

/// Extract a registration receipt from a gateway response
pub fn parse_receipt_response(response: &serde_json::Value) -> Option<RegistrationReceipt> {
    let tx_hash = response.get("txHash").and_then(|t| t.as_str())?;
    let asset_id = response.get("ipId").and_then(|i| i.as_str())?;
    if tx_hash.is_empty() || asset_id.is_empty() {
        return None;
    }

    let confirmed = response.get("status").and_then(|s| s.as_str()) == Some("confirmed");

    Some(RegistrationReceipt {
        tx_hash: TxHash::new(tx_hash),
        asset_id: IpAssetId::new(asset_id),
        confirmed,
    })
}

/// Parse a transaction status response. Unknown states are treated as
/// still pending.
pub fn parse_tx_status(response: &serde_json::Value) -> TxStatus {
    let status = response
        .get("status")
        .and_then(|s| s.as_str())
        .unwrap_or("pending");

    match status {
        "confirmed" => TxStatus::Confirmed,
        "failed" | "reverted" => {
            let msg = response
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            TxStatus::Failed(msg)
        }
        _ => TxStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_collection_response() {
        let response = json!({
            "address": "0x89aB000000000000000000000000000000000042",
            "txHash": "0xfeed"
        });
        let addr = parse_collection_response(&response).unwrap();
        assert_eq!(addr.as_str(), "0x89ab000000000000000000000000000000000042");
    }

    #[test]
    fn test_parse_collection_response_invalid() {
        assert!(parse_collection_response(&json!({"address": "not-an-address"})).is_none());
        assert!(parse_collection_response(&json!({"error": "denied"})).is_none());
    }

    #[test]
    fn test_parse_mint_response() {
        let response = json!({"tokenId": 12, "txHash": "0xbeef"});
        assert_eq!(parse_mint_response(&response).unwrap(), TokenId::from_raw(12));
        assert!(parse_mint_response(&json!({"tokenId": "twelve"})).is_none());
    }

    #[test]
    fn test_parse_receipt_response() {
        let response = json!({
            "txHash": "0xabc123",
            "ipId": "0x000000000000000000000000000000000000ip01",
            "status": "pending"
        });
        let receipt = parse_receipt_response(&response).unwrap();
        assert_eq!(receipt.tx_hash.as_str(), "0xabc123");
        assert!(!receipt.confirmed);

        let confirmed = json!({"txHash": "0xabc", "ipId": "0xdef", "status": "confirmed"});
        assert!(parse_receipt_response(&confirmed).unwrap().confirmed);
    }

    #[test]
    fn test_parse_receipt_response_rejects_empty_ids() {
        assert!(parse_receipt_response(&json!({"txHash": "", "ipId": "0xdef"})).is_none());
        assert!(parse_receipt_response(&json!({"txHash": "0xabc"})).is_none());
    }

    #[test]
    fn test_parse_tx_status() {
        assert_eq!(parse_tx_status(&json!({"status": "confirmed"})), TxStatus::Confirmed);
        assert_eq!(parse_tx_status(&json!({"status": "pending"})), TxStatus::Pending);
        assert_eq!(parse_tx_status(&json!({})), TxStatus::Pending);
        assert_eq!(parse_tx_status(&json!({"status": "queued"})), TxStatus::Pending);
        assert_eq!(
            parse_tx_status(&json!({"status": "failed", "error": "out of gas"})),
            TxStatus::Failed("out of gas".to_string())
        );
    }

    #[test]
    fn test_from_config_requires_credentials() {
        std::env::remove_var("IPKIT_ACCOUNT_KEY");
        std::env::remove_var("IPKIT_GATEWAY_URL");

        let config = crate::config::ClientConfig::default();
        let err = GatewayClient::from_config(&config).unwrap_err();
        assert!(matches!(err, IpkitError::ConfigError(_)));
    }
}
