//! Provider registry
//!
//! Maps pin provider names to concrete implementations.

pub mod gateway;
pub mod mock;
pub mod pinata;

pub use gateway::GatewayClient;
pub use mock::{MockLedger, MockPinProvider};
pub use pinata::PinataProvider;

use crate::config::ClientConfig;
use crate::pin::PinProvider;
use ipkit_core::{IpkitError, Result};

/// Create a pin provider by name with configuration
pub fn create_pin_provider(name: &str, config: &ClientConfig) -> Result<Box<dyn PinProvider>> {
    match name {
        "mock" => Ok(Box::new(mock::MockPinProvider::new())),
        "pinata" => Ok(Box::new(pinata::PinataProvider::from_config(config)?)),
        _ => Err(IpkitError::ConfigError(format!(
            "Unknown pin provider '{}'. Available: mock, pinata",
            name
        ))),
    }
}

/// List all available pin provider names
pub fn available_pin_providers() -> Vec<&'static str> {
    vec!["mock", "pinata"]
}
