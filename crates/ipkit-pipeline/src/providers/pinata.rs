//! Pinata pinning provider
//!
//! Uploads JSON documents through Pinata's pinning API. An upload is a
//! single HTTP round-trip, so `pin_json` blocks synchronously.

use ipkit_core::{IpkitError, Result};
use std::time::Duration;

use crate::config::{ClientConfig, RetryPolicy};
use crate::pin::{PinProvider, PinStatus};

const DEFAULT_PINATA_URL: &str = "https://api.pinata.cloud/pinning/pinJSONToIPFS";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Pinata provider for IPFS pinning
#[derive(Debug)]
pub struct PinataProvider {
    token: String,
    api_url: String,
    retry: RetryPolicy,
}

impl PinataProvider {
    /// Create a new PinataProvider from config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let token = config.require_pinning_token()?.to_string();

        let api_url = config
            .pinning
            .api_url
            .as_deref()
            .unwrap_or(DEFAULT_PINATA_URL)
            .to_string();

        Ok(Self {
            token,
            api_url,
            retry: config.retry.clone(),
        })
    }

    fn post_json_with_retry(&self, payload: &serde_json::Value) -> Result<serde_json::Value> {
        let attempts = self.retry.max_attempts.max(1);
        for attempt in 0..attempts {
            let agent = build_agent();
            let response = agent
                .post(&self.api_url)
                .header("Authorization", &format!("Bearer {}", self.token))
                .header("Content-Type", "application/json")
                .send_json(payload);

            match response {
                Ok(mut ok) => {
                    return ok.body_mut().read_json().map_err(|e| {
                        IpkitError::UploadError(format!(
                            "Failed to parse pinning response: {}",
                            e
                        ))
                    });
                }
                Err(e) => {
                    if attempt + 1 < attempts && is_retryable_error(&e) {
                        sleep_backoff(self.retry.base_delay_ms, attempt);
                        continue;
                    }
                    return Err(IpkitError::UploadError(format!(
                        "Pinning request failed: {}",
                        e
                    )));
                }
            }
        }

        Err(IpkitError::UploadError(
            "Pinning request failed after retries".to_string(),
        ))
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

impl PinProvider for PinataProvider {
    fn name(&self) -> &str {
        "pinata"
    }

    fn health_check(&self) -> Result<PinStatus> {
        if self.token.is_empty() {
            return Ok(PinStatus::NoAuthToken);
        }
        Ok(PinStatus::Available)
    }

    fn pin_json(&self, name: &str, content: &serde_json::Value) -> Result<String> {
        let payload = serde_json::json!({
            "pinataContent": content,
            "pinataMetadata": { "name": name },
        });

        let response = self.post_json_with_retry(&payload)?;

        parse_pin_response(&response).ok_or_else(|| {
            IpkitError::UploadError(format!(
                "Unexpected pinning response format: {}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            ))
        })
    }
}

/// Extract the content identifier from a Pinata response
pub fn parse_pin_response(response: &serde_json::Value) -> Option<String> {
    response
        .get("IpfsHash")
        .and_then(|h| h.as_str())
        .filter(|h| !h.is_empty())
        .map(|h| h.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_pin_response() {
        let response = json!({
            "IpfsHash": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
            "PinSize": 128,
            "Timestamp": "2024-03-01T12:00:00.000Z"
        });
        assert_eq!(
            parse_pin_response(&response).unwrap(),
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
    }

    #[test]
    fn test_parse_pin_response_invalid() {
        assert!(parse_pin_response(&json!({"error": "rate limited"})).is_none());
        assert!(parse_pin_response(&json!({"IpfsHash": ""})).is_none());
    }

    #[test]
    fn test_from_config_requires_token() {
        std::env::remove_var("IPKIT_PINNING_TOKEN");
        let config = ClientConfig::default();
        let err = PinataProvider::from_config(&config).unwrap_err();
        assert!(matches!(err, IpkitError::ConfigError(_)));
    }

    #[test]
    fn test_health_check_reports_missing_token() {
        let provider = PinataProvider {
            token: String::new(),
            api_url: DEFAULT_PINATA_URL.to_string(),
            retry: RetryPolicy::default(),
        };
        assert_eq!(provider.health_check().unwrap(), PinStatus::NoAuthToken);
    }
}
