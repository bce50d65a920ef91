//! Resolved configuration types consumed by the rest of the crate.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

/// What the bootstrap does when the storage backend itself fails
/// (as opposed to holding corrupt data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageFailurePolicy {
    /// Abort the bootstrap with [`AppError::Storage`].
    #[default]
    Fail,
    /// Keep going with an identity that lives only for this session.
    Ephemeral,
}

impl FromStr for StorageFailurePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "ephemeral" => Ok(Self::Ephemeral),
            other => Err(AppError::Config(format!(
                "unknown storage_failure policy '{other}' (expected \"fail\" or \"ephemeral\")"
            ))),
        }
    }
}

impl fmt::Display for StorageFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => f.write_str("fail"),
            Self::Ephemeral => f.write_str("ephemeral"),
        }
    }
}

/// Wallet identity settings (`[wallet]` in the TOML).
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Storage slot key the identity is persisted under.
    pub slot: String,
    pub storage_failure: StorageFailurePolicy,
}

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    /// Directory holding persisted slots (already expanded, no `~`).
    pub work_dir: PathBuf,
    pub log_level: String,
    /// Append logs here instead of stderr.
    pub log_file: Option<PathBuf>,
    pub wallet: WalletConfig,
}
