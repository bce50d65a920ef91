//! Wallet domain — the identity record and the ports the bootstrap talks to.
//!
//! - **identity** — `WalletIdentity`, its JSON form and validation.
//! - **store** — `WalletStore` port; file and in-memory backends.
//! - **keygen** — `WalletGenerator` port; ed25519 generator.
//! - **clipboard** — `Clipboard` port; OSC 52 backend and `copy_address`.

pub mod clipboard;
pub mod identity;
pub mod keygen;
pub mod store;

pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard, copy_address};
pub use identity::WalletIdentity;
pub use keygen::{Ed25519Generator, WalletGenerator, public_key_from_secret};
pub use store::{FileStore, MemoryStore, WalletStore};
