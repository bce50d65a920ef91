//! The persisted wallet identity record.
//!
//! Stored as a JSON object with camelCase keys:
//! ```text
//! {"publicKey": "<base58>", "secretKey": "<base58>", ...}
//! ```
//! Only `publicKey` is interpreted. Every other field the generator produced
//! is kept verbatim, in order, and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletIdentity {
    pub public_key: String,
    /// Fields this crate does not interpret (secret material and the like).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WalletIdentity {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            extra: Map::new(),
        }
    }

    /// Attach an opaque field, replacing any previous value under `key`.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Parse a stored slot value.
    ///
    /// Rejects anything that is not a JSON object with a non-blank string
    /// `publicKey`. A leading UTF-8 byte-order mark is ignored.
    pub fn decode(text: &str) -> Result<Self, AppError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let identity: Self = serde_json::from_str(text)
            .map_err(|e| AppError::Identity(format!("cannot parse stored identity: {e}")))?;
        if identity.public_key.trim().is_empty() {
            return Err(AppError::Identity("stored identity has an empty publicKey".into()));
        }
        Ok(identity)
    }

    /// Serialize for a single-shot slot write.
    pub fn encode(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Copy with secret-looking fields masked, for display.
    pub fn redacted(&self) -> Self {
        let extra = self
            .extra
            .iter()
            .map(|(k, v)| {
                if is_secret_field(k) {
                    (k.clone(), Value::String(REDACTED.into()))
                } else {
                    (k.clone(), v.clone())
                }
            })
            .collect();
        Self {
            public_key: self.public_key.clone(),
            extra,
        }
    }
}

fn is_secret_field(key: &str) -> bool {
    let k = key.to_ascii_lowercase();
    k.contains("secret") || k.contains("private") || k.contains("mnemonic") || k.contains("seed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_minimal_identity() {
        let id = WalletIdentity::decode(r#"{"publicKey":"abc123"}"#).unwrap();
        assert_eq!(id.public_key, "abc123");
        assert!(id.extra.is_empty());
    }

    #[test]
    fn decode_keeps_unknown_fields_in_order() {
        let text = r#"{"publicKey":"pk","secretKey":"sk","label":"main","version":2}"#;
        let id = WalletIdentity::decode(text).unwrap();
        let keys: Vec<&str> = id.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, ["secretKey", "label", "version"]);
        assert_eq!(id.encode().unwrap(), text);
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = WalletIdentity::decode("{not json").unwrap_err();
        assert!(err.to_string().contains("cannot parse stored identity"));
    }

    #[test]
    fn decode_rejects_non_objects_and_missing_key() {
        assert!(WalletIdentity::decode(r#""abc123""#).is_err());
        assert!(WalletIdentity::decode("[]").is_err());
        assert!(WalletIdentity::decode("null").is_err());
        assert!(WalletIdentity::decode(r#"{"secretKey":"sk"}"#).is_err());
        assert!(WalletIdentity::decode(r#"{"publicKey":42}"#).is_err());
    }

    #[test]
    fn decode_ignores_leading_bom() {
        let id = WalletIdentity::decode("\u{feff}{\"publicKey\":\"abc123\"}").unwrap();
        assert_eq!(id.public_key, "abc123");
    }

    #[test]
    fn decode_rejects_empty_text() {
        assert!(WalletIdentity::decode("").is_err());
        assert!(WalletIdentity::decode("\u{feff}").is_err());
    }

    #[test]
    fn decode_rejects_blank_public_key() {
        let err = WalletIdentity::decode(r#"{"publicKey":"   "}"#).unwrap_err();
        assert!(err.to_string().contains("empty publicKey"));
    }

    #[test]
    fn redacted_masks_secret_fields_only() {
        let id = WalletIdentity::new("pk")
            .with_field("secretKey", "sk")
            .with_field("privateKeyEnc", "enc")
            .with_field("label", "main");
        let shown = id.redacted();
        assert_eq!(shown.public_key, "pk");
        assert_eq!(shown.field("secretKey"), Some(&Value::from(REDACTED)));
        assert_eq!(shown.field("privateKeyEnc"), Some(&Value::from(REDACTED)));
        assert_eq!(shown.field("label"), Some(&Value::from("main")));
        // source value untouched
        assert_eq!(id.field("secretKey"), Some(&Value::from("sk")));
    }
}
