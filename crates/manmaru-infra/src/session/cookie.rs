//! Signed session cookie values.
//!
//! A session cookie carries `<session-uuid>.<hex hmac-sha256(key, session-uuid)>`.
//! The transcript itself stays server-side; the signature only stops clients
//! from forging or guessing another session's id.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use uuid::Uuid;

use manmaru_types::config::RelayConfig;
use manmaru_types::session::SessionId;

type HmacSha256 = Hmac<Sha256>;

/// Errors from verifying a session cookie value.
#[derive(Debug, thiserror::Error)]
pub enum SessionCookieError {
    #[error("malformed session cookie")]
    Malformed,

    #[error("session cookie signature mismatch")]
    BadSignature,

    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

/// Signs and verifies session cookie values with a process-wide key.
///
/// Does NOT derive Debug so the key never ends up in logs.
#[derive(Clone)]
pub struct SessionCookieSigner {
    key: SecretString,
}

impl SessionCookieSigner {
    /// Create a signer from a configured secret.
    pub fn new(key: SecretString) -> Self {
        Self { key }
    }

    /// Create a signer with a fresh random key (valid for this process only).
    pub fn random() -> Self {
        let key = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        Self::new(SecretString::from(key))
    }

    /// Use the configured `session_secret`, or a random key when none is set.
    pub fn from_config(config: &RelayConfig) -> Self {
        match config.session_secret.as_deref() {
            Some(secret) if !secret.is_empty() => Self::new(SecretString::from(secret.to_string())),
            _ => {
                tracing::warn!(
                    "No session_secret configured; using a random key, sessions will not survive a restart"
                );
                Self::random()
            }
        }
    }

    /// Produce the cookie value for a session.
    pub fn sign(&self, session: &SessionId) -> Result<String, SessionCookieError> {
        let id = session.to_string();
        let mac = self.mac(id.as_bytes())?.finalize().into_bytes();
        Ok(format!("{id}.{}", hex_encode(&mac)))
    }

    /// Recover the session id from a cookie value, checking its signature
    /// in constant time.
    pub fn verify(&self, value: &str) -> Result<SessionId, SessionCookieError> {
        let (id, signature_hex) = value
            .split_once('.')
            .ok_or(SessionCookieError::Malformed)?;
        let signature = hex_decode(signature_hex).map_err(|_| SessionCookieError::Malformed)?;

        self.mac(id.as_bytes())?
            .verify_slice(&signature)
            .map_err(|_| SessionCookieError::BadSignature)?;

        id.parse::<SessionId>()
            .map_err(|_| SessionCookieError::Malformed)
    }

    fn mac(&self, data: &[u8]) -> Result<HmacSha256, SessionCookieError> {
        let mut mac = HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
            .map_err(|e| SessionCookieError::InvalidKey(e.to_string()))?;
        mac.update(data);
        Ok(mac)
    }
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Result<Vec<u8>, ()> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return Err(());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ()))
        .collect()
}

/// Encode bytes to a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(key: &str) -> SessionCookieSigner {
        SessionCookieSigner::new(SecretString::from(key.to_string()))
    }

    #[test]
    fn sign_then_verify_returns_session() {
        let s = signer("dev-secret-key");
        let id = SessionId::new();
        let value = s.sign(&id).unwrap();
        assert!(value.starts_with(&id.to_string()));
        assert_eq!(s.verify(&value).unwrap(), id);
    }

    #[test]
    fn tampered_id_is_rejected() {
        let s = signer("dev-secret-key");
        let value = s.sign(&SessionId::new()).unwrap();
        let (_, sig) = value.split_once('.').unwrap();
        let forged = format!("{}.{sig}", SessionId::new());
        assert!(matches!(s.verify(&forged), Err(SessionCookieError::BadSignature)));
    }

    #[test]
    fn other_key_is_rejected() {
        let value = signer("key-one").sign(&SessionId::new()).unwrap();
        assert!(matches!(
            signer("key-two").verify(&value),
            Err(SessionCookieError::BadSignature)
        ));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let s = signer("k");
        for value in ["", "no-dot", "abc.zz", "abc.123", "ünïcode.ab"] {
            assert!(s.verify(value).is_err(), "value {value:?}");
        }
    }

    #[test]
    fn random_signers_disagree() {
        let id = SessionId::new();
        let value = SessionCookieSigner::random().sign(&id).unwrap();
        assert!(SessionCookieSigner::random().verify(&value).is_err());
    }

    #[test]
    fn from_config_uses_configured_secret() {
        let config = RelayConfig {
            session_secret: Some("dev-secret-key".to_string()),
            ..RelayConfig::default()
        };
        let value = SessionCookieSigner::from_config(&config)
            .sign(&SessionId::new())
            .unwrap();
        assert!(signer("dev-secret-key").verify(&value).is_ok());
    }

    #[test]
    fn hex_roundtrip() {
        let bytes = [0u8, 1, 0xab, 0xff];
        assert_eq!(hex_decode(&hex_encode(&bytes)).unwrap(), bytes.to_vec());
    }
}
