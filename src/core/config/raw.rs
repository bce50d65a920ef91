//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

/// Raw TOML shape — serde target before resolution.
#[derive(Deserialize)]
pub(super) struct RawConfig {
    pub app: RawApp,
    #[serde(default)]
    pub wallet: RawWallet,
}

#[derive(Deserialize)]
pub(super) struct RawApp {
    #[serde(default = "default_app_name")]
    pub name: String,
    pub work_dir: String,
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct RawWallet {
    #[serde(default = "default_slot")]
    pub slot: String,
    /// `"fail"` or `"ephemeral"`.
    #[serde(default = "default_storage_failure")]
    pub storage_failure: String,
}

impl Default for RawWallet {
    fn default() -> Self {
        Self {
            slot: default_slot(),
            storage_failure: default_storage_failure(),
        }
    }
}

pub(super) fn default_app_name() -> String {
    "wegram".to_string()
}

pub(super) fn default_work_dir() -> String {
    "~/.wegram".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_slot() -> String {
    crate::bootstrap::identity::DEFAULT_SLOT.to_string()
}

pub(super) fn default_storage_failure() -> String {
    "fail".to_string()
}
