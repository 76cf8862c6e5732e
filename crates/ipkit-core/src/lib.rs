//! ipkit Core - Foundational types for the registration pipeline
//!
//! This crate provides the core types that all other ipkit crates depend on:
//! - `ContentHash` - SHA-256 based content hashing
//! - `Address`, `TokenId`, `TxHash`, `IpAssetId` - identifier newtypes
//! - Error types and Result alias

mod error;
mod hash;
mod types;

pub use error::{IpkitError, Result};
pub use hash::ContentHash;
pub use types::{Address, IpAssetId, TokenId, TxHash};
