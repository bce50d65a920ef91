//! Key-generation port and the default ed25519 generator.
//!
//! The default generator follows the Solana keypair convention:
//! `publicKey` is the base58 verifying key (32 bytes) and `secretKey` is the
//! base58 of `seed ‖ verifying_key` (64 bytes).

use ed25519_dalek::{SecretKey, SigningKey};
use rand_core::OsRng;

use crate::error::AppError;

use super::identity::WalletIdentity;

/// Field name the default generator stores secret material under.
pub const SECRET_KEY_FIELD: &str = "secretKey";

/// Produces a brand new wallet identity.
pub trait WalletGenerator {
    fn generate_wallet(&self) -> Result<WalletIdentity, AppError>;
}

impl<T: WalletGenerator + ?Sized> WalletGenerator for &T {
    fn generate_wallet(&self) -> Result<WalletIdentity, AppError> {
        (**self).generate_wallet()
    }
}

/// ed25519 keypair from the OS RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Generator;

impl WalletGenerator for Ed25519Generator {
    fn generate_wallet(&self) -> Result<WalletIdentity, AppError> {
        let signing_key = SigningKey::generate(&mut OsRng);
        Ok(identity_from_signing_key(&signing_key))
    }
}

fn identity_from_signing_key(signing_key: &SigningKey) -> WalletIdentity {
    let public_key = bs58::encode(signing_key.verifying_key().to_bytes()).into_string();
    let secret_key = bs58::encode(signing_key.to_keypair_bytes()).into_string();
    WalletIdentity::new(public_key).with_field(SECRET_KEY_FIELD, secret_key)
}

/// Re-derive the base58 public key from a base58 secret.
///
/// Accepts either the 64-byte keypair form (whose embedded public half must
/// match the derived one) or a bare 32-byte seed.
pub fn public_key_from_secret(secret_b58: &str) -> Result<String, AppError> {
    let bytes = bs58::decode(secret_b58.trim())
        .into_vec()
        .map_err(|e| AppError::Identity(format!("secretKey is not valid base58: {e}")))?;

    let signing_key = match bytes.len() {
        64 => {
            let keypair: [u8; 64] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| AppError::Identity("secretKey is not 64 bytes".into()))?;
            SigningKey::from_keypair_bytes(&keypair).map_err(|_| {
                AppError::Identity(
                    "keypair mismatch: public half does not match the secret seed".into(),
                )
            })?
        }
        32 => {
            let seed: SecretKey = bytes
                .as_slice()
                .try_into()
                .map_err(|_| AppError::Identity("secretKey is not 32 bytes".into()))?;
            SigningKey::from_bytes(&seed)
        }
        n => {
            return Err(AppError::Identity(format!(
                "secretKey decodes to {n} bytes; expected 32 or 64"
            )));
        }
    };

    Ok(bs58::encode(signing_key.verifying_key().to_bytes()).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret_of(identity: &WalletIdentity) -> String {
        identity
            .field(SECRET_KEY_FIELD)
            .and_then(|v| v.as_str())
            .expect("generator must emit secretKey")
            .to_string()
    }

    #[test]
    fn generated_public_key_is_32_bytes_base58() {
        let identity = Ed25519Generator.generate_wallet().unwrap();
        let raw = bs58::decode(&identity.public_key).into_vec().unwrap();
        assert_eq!(raw.len(), 32);
        assert!(!identity.public_key.is_empty());
    }

    #[test]
    fn generate_produces_unique_keys() {
        let a = Ed25519Generator.generate_wallet().unwrap();
        let b = Ed25519Generator.generate_wallet().unwrap();
        assert_ne!(a.public_key, b.public_key);
        assert_ne!(secret_of(&a), secret_of(&b));
    }

    #[test]
    fn secret_rederives_public_key() {
        let identity = Ed25519Generator.generate_wallet().unwrap();
        let derived = public_key_from_secret(&secret_of(&identity)).unwrap();
        assert_eq!(derived, identity.public_key);
    }

    #[test]
    fn bare_seed_rederives_public_key() {
        let signing_key = SigningKey::from_bytes(&[7u8; 32]);
        let expected = bs58::encode(signing_key.verifying_key().to_bytes()).into_string();
        let seed_b58 = bs58::encode([7u8; 32]).into_string();
        assert_eq!(public_key_from_secret(&seed_b58).unwrap(), expected);
    }

    #[test]
    fn tampered_keypair_is_rejected() {
        let mut keypair = SigningKey::from_bytes(&[1u8; 32]).to_keypair_bytes();
        keypair[63] ^= 0xff;
        let err = public_key_from_secret(&bs58::encode(keypair).into_string()).unwrap_err();
        assert!(err.to_string().contains("keypair mismatch"));
    }

    #[test]
    fn wrong_length_and_bad_alphabet_are_rejected() {
        assert!(public_key_from_secret(&bs58::encode([0u8; 16]).into_string()).is_err());
        assert!(public_key_from_secret("0OIl").is_err());
    }
}
