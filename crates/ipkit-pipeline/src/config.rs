//! Layered client configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `IPKIT_ACCOUNT_KEY`, `IPKIT_GATEWAY_URL`,
//!    `IPKIT_PINNING_TOKEN`
//! 2. Project-local: `.ipkit/config.toml`
//! 3. Global: `~/.ipkit/config.toml`

use ipkit_core::{IpkitError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Account credential used to authorize ledger operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    #[serde(default)]
    pub key: Option<String>,
}

/// Target network and gateway endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub gateway_url: Option<String>,
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            gateway_url: None,
            chain_id: default_chain_id(),
        }
    }
}

fn default_chain_id() -> String {
    "1".to_string()
}

/// Pinning service credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinningConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Retry settings for remote calls.
///
/// `max_attempts` of 1 means a single attempt with no retry, which is the
/// default. When raised, only transient failures (timeouts, connection
/// errors, 429/5xx responses) are retried, with exponential backoff from
/// `base_delay_ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    1
}
fn default_base_delay_ms() -> u64 {
    500
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfigFile {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub pinning: PinningConfig,
    #[serde(default)]
    pub retry: RetryPolicy,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub account: AccountConfig,
    pub network: NetworkConfig,
    pub pinning: PinningConfig,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = ClientConfigFile::default();

        // Layer 1: Global config (~/.ipkit/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config (.ipkit/config.toml)
        let local_path = PathBuf::from(".ipkit/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        // Layer 3: Environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(Self::from_file_config(config))
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(Self::from_file_config(config))
    }

    /// Get the account credential, failing fast if it is not configured
    pub fn require_account_key(&self) -> Result<&str> {
        self.account.key.as_deref().ok_or_else(|| {
            IpkitError::ConfigError(
                "Account key not configured. Set IPKIT_ACCOUNT_KEY or add [account] key to .ipkit/config.toml".to_string(),
            )
        })
    }

    /// Get the gateway endpoint, failing fast if it is not configured
    pub fn require_gateway_url(&self) -> Result<&str> {
        self.network.gateway_url.as_deref().ok_or_else(|| {
            IpkitError::ConfigError(
                "Gateway URL not configured. Set IPKIT_GATEWAY_URL or add [network] gateway_url to .ipkit/config.toml".to_string(),
            )
        })
    }

    /// Get the pinning service token, failing fast if it is not configured
    pub fn require_pinning_token(&self) -> Result<&str> {
        self.pinning.token.as_deref().ok_or_else(|| {
            IpkitError::ConfigError(
                "Pinning token not configured. Set IPKIT_PINNING_TOKEN or add [pinning] token to .ipkit/config.toml".to_string(),
            )
        })
    }

    fn from_file_config(config: ClientConfigFile) -> Self {
        Self {
            account: config.account,
            network: config.network,
            pinning: config.pinning,
            retry: config.retry,
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ipkit").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<ClientConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfigFile = toml::from_str(&content).map_err(|e| {
            IpkitError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut ClientConfigFile, overlay: ClientConfigFile) {
        if overlay.account.key.is_some() {
            base.account.key = overlay.account.key;
        }
        if overlay.network.gateway_url.is_some() {
            base.network.gateway_url = overlay.network.gateway_url;
        }
        if overlay.network.chain_id != default_chain_id() {
            base.network.chain_id = overlay.network.chain_id;
        }
        if overlay.pinning.token.is_some() {
            base.pinning.token = overlay.pinning.token;
        }
        if overlay.pinning.api_url.is_some() {
            base.pinning.api_url = overlay.pinning.api_url;
        }
        base.retry = overlay.retry;
    }

    fn apply_env_overrides(config: &mut ClientConfigFile) {
        if let Ok(key) = std::env::var("IPKIT_ACCOUNT_KEY") {
            config.account.key = Some(key);
        }
        if let Ok(url) = std::env::var("IPKIT_GATEWAY_URL") {
            config.network.gateway_url = Some(url);
        }
        if let Ok(token) = std::env::var("IPKIT_PINNING_TOKEN") {
            config.pinning.token = Some(token);
        }
    }
}
