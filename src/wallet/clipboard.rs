//! Clipboard capability for copying the wallet address.
//!
//! Copying is best effort: failures are logged and handed back to the caller,
//! which decides how to tell the user.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

use crate::error::AppError;

use super::identity::WalletIdentity;

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), AppError>;
}

/// Terminal clipboard via the OSC 52 escape sequence
/// (`ESC ] 52 ; c ; <base64> BEL`). Works over SSH in terminals that allow it.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        let payload = STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{payload}\x07")
            .and_then(|_| self.out.flush())
            .map_err(|e| AppError::Clipboard(format!("terminal write failed: {e}")))
    }
}

/// Keeps the last copied text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copy the identity's public address.
pub fn copy_address(identity: &WalletIdentity, clipboard: &mut dyn Clipboard) -> Result<(), AppError> {
    match clipboard.write_text(&identity.public_key) {
        Ok(()) => {
            info!(public_key = %identity.public_key, "address copied to clipboard");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "address copy failed");
            Err(e)
        }
    }
}
