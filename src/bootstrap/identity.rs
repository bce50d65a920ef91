//! Wallet identity bootstrap — load the persisted identity, or generate and
//! persist a new one.
//!
//! Runs once per session before anything reads the wallet address:
//!
//! 1. read the slot (default `"wegram_wallet"`)
//! 2. a parseable identity becomes active, nothing is written
//! 3. an absent or corrupt slot gets a freshly generated identity, written
//!    back as a single full replace
//!
//! Storage failures follow the configured [`StorageFailurePolicy`]. A failing
//! generator aborts the call without writing; the next call retries.
//!
//! Two processes bootstrapping the same slot at once are not serialized
//! against each other: the last write wins.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::config::{Config, StorageFailurePolicy, WalletConfig};
use crate::error::AppError;
use crate::wallet::{Ed25519Generator, FileStore, WalletGenerator, WalletIdentity, WalletStore};

/// Slot key the identity lives under unless configured otherwise.
pub const DEFAULT_SLOT: &str = "wegram_wallet";

/// What a slot read turned up.
#[derive(Debug)]
pub enum StoredIdentity {
    Found(WalletIdentity),
    Absent,
    /// The slot holds something that is not a valid identity.
    Corrupt(String),
    /// The storage backend itself failed.
    Unavailable(AppError),
}

/// Read and classify the slot. Never fails; every outcome is a variant.
pub fn load_stored<S: WalletStore + ?Sized>(store: &S, slot: &str) -> StoredIdentity {
    match store.read(slot) {
        Ok(None) => StoredIdentity::Absent,
        Ok(Some(text)) => match WalletIdentity::decode(&text) {
            Ok(identity) => StoredIdentity::Found(identity),
            Err(e) => StoredIdentity::Corrupt(e.to_string()),
        },
        Err(AppError::CorruptSlot(reason)) => StoredIdentity::Corrupt(reason),
        Err(e) => StoredIdentity::Unavailable(as_storage_error(e)),
    }
}

fn as_storage_error(e: AppError) -> AppError {
    match e {
        AppError::Storage(_) => e,
        other => AppError::Storage(other.to_string()),
    }
}

/// Owns the ports and the session's active identity.
pub struct WalletBootstrap<S, G> {
    store: S,
    generator: G,
    slot: String,
    policy: StorageFailurePolicy,
    active: Option<WalletIdentity>,
    persisted: bool,
}

impl<S: WalletStore, G: WalletGenerator> WalletBootstrap<S, G> {
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store,
            generator,
            slot: DEFAULT_SLOT.to_string(),
            policy: StorageFailurePolicy::default(),
            active: None,
            persisted: false,
        }
    }

    pub fn from_config(store: S, generator: G, config: &WalletConfig) -> Self {
        Self::new(store, generator)
            .with_slot(config.slot.clone())
            .with_policy(config.storage_failure)
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    pub fn with_policy(mut self, policy: StorageFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// The identity resolved by a previous successful [`ensure_identity`](Self::ensure_identity).
    pub fn active(&self) -> Option<&WalletIdentity> {
        self.active.as_ref()
    }

    /// `false` until an identity is active and known to be in the slot.
    pub fn persisted(&self) -> bool {
        self.persisted
    }

    /// Guarantee an active identity for this session and return it.
    ///
    /// Once an identity is active, later calls return it without touching
    /// storage or the generator.
    pub fn ensure_identity(&mut self) -> Result<WalletIdentity, AppError> {
        if let Some(identity) = &self.active {
            debug!(slot = %self.slot, "wallet identity already active");
            return Ok(identity.clone());
        }

        let mut writable = true;
        match load_stored(&self.store, &self.slot) {
            StoredIdentity::Found(identity) => {
                info!(slot = %self.slot, public_key = %identity.public_key, "wallet identity loaded");
                self.persisted = true;
                self.active = Some(identity.clone());
                return Ok(identity);
            }
            StoredIdentity::Absent => {
                info!(slot = %self.slot, "no stored wallet identity; generating one");
            }
            StoredIdentity::Corrupt(reason) => {
                warn!(slot = %self.slot, %reason, "stored wallet identity is corrupt; regenerating");
            }
            StoredIdentity::Unavailable(e) => match self.policy {
                StorageFailurePolicy::Fail => {
                    error!(slot = %self.slot, error = %e, "wallet storage unavailable");
                    return Err(e);
                }
                StorageFailurePolicy::Ephemeral => {
                    warn!(slot = %self.slot, error = %e, "wallet storage unavailable; using a session-only identity");
                    writable = false;
                }
            },
        }

        let identity = self.generator.generate_wallet().map_err(|e| {
            error!(slot = %self.slot, error = %e, "wallet generation failed");
            e
        })?;

        self.persisted = false;
        if writable {
            let encoded = identity.encode()?;
            match self.store.write(&self.slot, &encoded) {
                Ok(()) => {
                    self.persisted = true;
                    info!(slot = %self.slot, public_key = %identity.public_key, "wallet identity created");
                }
                Err(e) => {
                    let e = as_storage_error(e);
                    match self.policy {
                        StorageFailurePolicy::Fail => {
                            error!(slot = %self.slot, error = %e, "cannot persist wallet identity");
                            return Err(e);
                        }
                        StorageFailurePolicy::Ephemeral => {
                            warn!(slot = %self.slot, error = %e, "cannot persist wallet identity; keeping it for this session only");
                        }
                    }
                }
            }
        }

        self.active = Some(identity.clone());
        Ok(identity)
    }
}

/// Result of [`setup`].
#[derive(Debug, Clone)]
pub struct ActiveWallet {
    pub identity: WalletIdentity,
    /// `false` when running on a session-only identity.
    pub persisted: bool,
    /// File backing the slot.
    pub slot_path: PathBuf,
}

/// Bootstrap the wallet identity under `config.work_dir` with the default
/// ed25519 generator.
pub fn setup(config: &Config) -> Result<ActiveWallet, AppError> {
    let store = FileStore::new(&config.work_dir);
    let slot_path = store.slot_path(&config.wallet.slot)?;
    let mut bootstrap = WalletBootstrap::from_config(store, Ed25519Generator, &config.wallet);
    let identity = bootstrap.ensure_identity()?;
    Ok(ActiveWallet {
        identity,
        persisted: bootstrap.persisted(),
        slot_path,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
