//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `WEGRAM_WORK_DIR` and `WEGRAM_LOG_LEVEL` env overrides.
//!
//! # Module layout
//!
//! - **types** — Public configuration structs (`Config`, `WalletConfig`,
//!   `StorageFailurePolicy`).
//! - **raw** — Raw TOML deserialization types; mirror the file shape and use
//!   serde defaults. Kept private.
//! - **load** — Loading logic: `merge_toml`, `load_raw_merged`, `load`,
//!   `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from};
pub use types::*;

#[cfg(test)]
impl Config {
    /// `Config` for unit tests, rooted at a caller-owned directory.
    pub fn test_default(work_dir: &std::path::Path) -> Self {
        Self {
            app_name: "test".into(),
            work_dir: work_dir.to_path_buf(),
            log_level: "info".into(),
            log_file: None,
            wallet: WalletConfig {
                slot: raw::default_slot(),
                storage_failure: StorageFailurePolicy::Fail,
            },
        }
    }
}
