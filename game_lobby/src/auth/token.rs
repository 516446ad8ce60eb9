//! Opaque bearer-token codec.
//!
//! Tokens are AES-256-GCM sealed payloads: a fresh 96-bit nonce, the
//! ciphertext, and the authentication tag, encoded as unpadded url-safe
//! base64. Encryption gives confidentiality over the payload and the GCM
//! tag gives tamper detection, so a token that was not produced with the
//! configured secret never decodes to a "valid but different" payload.
//!
//! Encoding is randomized (per-call nonce); only the round-trip is
//! guaranteed. The codec holds no per-call state and is safe to share
//! across concurrent requests.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// GCM nonce length in bytes (96 bits).
const NONCE_LEN: usize = 12;

/// GCM authentication tag length in bytes.
const TAG_LEN: usize = 16;

/// Token codec errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Not a well-formed token (bad encoding, truncated, or non-text payload)
    #[error("malformed token")]
    Malformed,

    /// Well-formed but failed decryption or the integrity check
    #[error("token failed integrity check")]
    Integrity,

    /// The encryption primitive itself failed while sealing a payload
    #[error("token encryption failed")]
    Encrypt,
}

/// Symmetric codec for opaque bearer tokens.
#[derive(Clone)]
pub struct TokenCodec {
    cipher: Aes256Gcm,
}

impl TokenCodec {
    /// Create a codec from a shared secret of any length.
    ///
    /// The AES-256 key is the SHA-256 digest of the secret, so operators
    /// can configure a passphrase rather than exact key bytes.
    pub fn new(secret: &[u8]) -> Self {
        let key = Sha256::digest(secret);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
        Self { cipher }
    }

    /// Seal a payload into a transport-safe token string.
    ///
    /// # Errors
    ///
    /// * `TokenError::Encrypt` - the underlying primitive failed
    pub fn encode(&self, payload: &str) -> Result<String, TokenError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, payload.as_bytes())
            .map_err(|_| TokenError::Encrypt)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(nonce.as_slice());
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    /// Open a token string back into its payload.
    ///
    /// # Errors
    ///
    /// * `TokenError::Malformed` - not base64, shorter than nonce + tag, or
    ///   the plaintext is not UTF-8
    /// * `TokenError::Integrity` - produced with a different secret, or any
    ///   byte of the token was altered
    pub fn decode(&self, token: &str) -> Result<String, TokenError> {
        let sealed = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| TokenError::Malformed)?;
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(TokenError::Malformed);
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let payload = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| TokenError::Integrity)?;
        String::from_utf8(payload).map_err(|_| TokenError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_for_token_codec_tests";

    #[test]
    fn test_round_trip() {
        let codec = TokenCodec::new(SECRET);
        for payload in ["0", "-1", "42", "9223372036854775807", "-9223372036854775808"] {
            let token = codec.encode(payload).expect("encode should succeed");
            assert_eq!(codec.decode(&token).expect("decode should succeed"), payload);
        }
    }

    #[test]
    fn test_encoding_is_randomized_but_stable() {
        let codec = TokenCodec::new(SECRET);
        let a = codec.encode("42").unwrap();
        let b = codec.encode("42").unwrap();
        assert_ne!(a, b, "fresh nonce per call");
        assert_eq!(codec.decode(&a).unwrap(), "42");
        assert_eq!(codec.decode(&b).unwrap(), "42");
    }

    #[test]
    fn test_output_is_transport_safe() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.encode("1234567890").unwrap();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "token must be header/query safe: {token}"
        );
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let codec = TokenCodec::new(SECRET);
        let other = TokenCodec::new(b"a_completely_different_secret_value");
        let token = codec.encode("42").unwrap();
        assert!(matches!(other.decode(&token), Err(TokenError::Integrity)));
    }

    #[test]
    fn test_every_single_character_mutation_is_rejected() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.encode("42").unwrap();

        for i in 0..token.len() {
            let original = token.as_bytes()[i];
            let replacement = if original == b'A' { b'B' } else { b'A' };
            let mut tampered = token.clone().into_bytes();
            tampered[i] = replacement;
            let tampered = String::from_utf8(tampered).unwrap();
            assert!(
                codec.decode(&tampered).is_err(),
                "mutation at byte {i} should be rejected"
            );
        }
    }

    #[test]
    fn test_garbage_inputs_are_malformed() {
        let codec = TokenCodec::new(SECRET);
        // Too short to hold a nonce and tag, valid base64 or not.
        assert!(matches!(codec.decode("black"), Err(TokenError::Malformed)));
        assert!(matches!(codec.decode("white"), Err(TokenError::Malformed)));
        assert!(matches!(codec.decode(""), Err(TokenError::Malformed)));
        // Not base64 at all.
        assert!(matches!(
            codec.decode("not a token!!"),
            Err(TokenError::Malformed)
        ));
    }
}
