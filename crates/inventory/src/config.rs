//! Facade configuration.

use serde::{Deserialize, Serialize};

/// Products at or below this stock level are flagged for restocking.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

pub const ENV_LOW_STOCK_THRESHOLD: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";
pub const ENV_SEED_DEFAULTS: &str = "STOCKROOM_SEED_DEFAULTS";
pub const ENV_READ_ACCESS: &str = "STOCKROOM_READ_ACCESS";

/// Who may run read-only catalog queries (get, list, search, low stock).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadAccess {
    /// Anyone, including anonymous sessions.
    #[default]
    Public,
    /// Any logged-in user.
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub low_stock_threshold: i64,
    /// Register the documented `admin`/`user` demo accounts at startup.
    pub seed_default_accounts: bool,
    pub read_access: ReadAccess,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            seed_default_accounts: true,
            read_access: ReadAccess::Public,
        }
    }
}

impl InventoryConfig {
    /// Build from `STOCKROOM_*` environment variables, falling back to
    /// defaults for anything unset or malformed.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test fixtures, ...).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LOW_STOCK_THRESHOLD) {
            match raw.trim().parse::<i64>() {
                Ok(threshold) if threshold >= 0 => config.low_stock_threshold = threshold,
                _ => tracing::warn!(
                    key = ENV_LOW_STOCK_THRESHOLD,
                    value = %raw,
                    "ignoring invalid low-stock threshold"
                ),
            }
        }

        if let Some(raw) = lookup(ENV_SEED_DEFAULTS) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.seed_default_accounts = true,
                "0" | "false" | "no" | "off" => config.seed_default_accounts = false,
                _ => tracing::warn!(key = ENV_SEED_DEFAULTS, value = %raw, "ignoring invalid flag"),
            }
        }

        if let Some(raw) = lookup(ENV_READ_ACCESS) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "public" => config.read_access = ReadAccess::Public,
                "authenticated" => config.read_access = ReadAccess::Authenticated,
                _ => tracing::warn!(key = ENV_READ_ACCESS, value = %raw, "ignoring invalid read access"),
            }
        }

        config
    }
}
