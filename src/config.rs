//! Configuration Module
//!
//! Handles loading and managing memory storage configuration.

use std::env;

use serde::{Deserialize, Serialize};

use crate::storage::Expiry;

/// Memory storage configuration, fixed for the lifetime of a store.
///
/// A limit of 0 means "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Lifetime in seconds applied when an object is stored without an
    /// expiry, None = never expires
    pub expiry_seconds: Option<u64>,
    /// Maximum number of objects the container holds
    pub count_limit: u64,
    /// Maximum summed cost of the objects the container holds
    pub total_cost_limit: u64,
}

impl MemoryConfig {
    pub fn new(count_limit: u64, total_cost_limit: u64) -> Self {
        Self {
            expiry_seconds: None,
            count_limit,
            total_cost_limit,
        }
    }

    /// Returns the config with a default lifetime for stored objects.
    pub fn with_expiry_seconds(mut self, seconds: u64) -> Self {
        self.expiry_seconds = Some(seconds);
        self
    }

    // == Default Expiry ==
    /// Resolves the default lifetime against the current time.
    pub fn default_expiry(&self) -> Expiry {
        match self.expiry_seconds {
            Some(seconds) => Expiry::seconds(i64::try_from(seconds).unwrap_or(i64::MAX)),
            None => Expiry::Never,
        }
    }

    /// Creates a new MemoryConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMORY_COUNT_LIMIT` - Maximum objects (default: 0, unlimited)
    /// - `MEMORY_TOTAL_COST_LIMIT` - Maximum summed cost (default: 0, unlimited)
    /// - `MEMORY_EXPIRY_SECONDS` - Default object lifetime (default: unset,
    ///   never expires)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            expiry_seconds: env::var("MEMORY_EXPIRY_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(defaults.expiry_seconds),
            count_limit: env::var("MEMORY_COUNT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.count_limit),
            total_cost_limit: env::var("MEMORY_TOTAL_COST_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.total_cost_limit),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
