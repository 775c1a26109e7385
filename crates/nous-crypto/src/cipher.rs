use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::{Key, KeyInit, XChaCha20Poly1305, XNonce};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

/// Application-wide KDF salt. Fixed on purpose: the key must be
/// deterministic per secret so that every process derives the same key.
const KDF_SALT: &[u8] = b"nous_encryption_salt_v1";
const KDF_ITERATIONS: u32 = 100_000;
const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed")]
    Encrypt,
}

/// Outcome of attempting to decrypt a stored field.
///
/// Stored strings predating the encryption rollout are plain text; anything
/// that does not decode and authenticate under the current key is classified
/// `Legacy` and passed through unchanged. Real tampering is indistinguishable
/// from legacy plaintext here, so callers must not treat `Legacy` as a
/// tamper signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptOutcome {
    Decrypted(String),
    Legacy,
}

/// Symmetric cipher for sensitive fields.
///
/// The key is derived once (PBKDF2-HMAC-SHA256) from the configured secret
/// and held read-only for the process lifetime. Ciphertexts are URL-safe
/// base64 over `nonce || XChaCha20-Poly1305 ciphertext`, so decryption needs
/// only the standing key.
#[derive(Clone)]
pub struct Cipher {
    aead: XChaCha20Poly1305,
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Cipher([REDACTED])")
    }
}

impl Cipher {
    pub fn new(secret: &str) -> Self {
        let mut key = [0u8; 32];
        pbkdf2_hmac::<Sha256>(secret.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut key);
        let aead = XChaCha20Poly1305::new(Key::from_slice(&key));
        Self { aead }
    }

    /// Encrypt a single string. Empty input passes through unchanged.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = XNonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .aead
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Encrypt)?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);
        Ok(URL_SAFE.encode(blob))
    }

    /// Decrypt a stored field, falling back to the input itself when it is
    /// not ciphertext under the current key.
    pub fn decrypt(&self, input: &str) -> String {
        match self.try_decrypt(input) {
            DecryptOutcome::Decrypted(plaintext) => plaintext,
            DecryptOutcome::Legacy => input.to_string(),
        }
    }

    /// Attempt decryption, keeping the encrypted-vs-legacy distinction
    /// explicit instead of collapsing it.
    pub fn try_decrypt(&self, input: &str) -> DecryptOutcome {
        if input.is_empty() {
            return DecryptOutcome::Legacy;
        }

        let blob = match URL_SAFE.decode(input) {
            Ok(blob) => blob,
            Err(_) => return DecryptOutcome::Legacy,
        };
        if blob.len() < NONCE_LEN + TAG_LEN {
            return DecryptOutcome::Legacy;
        }

        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
        let nonce = XNonce::from_slice(nonce_bytes);
        match self.aead.decrypt(nonce, ciphertext) {
            Ok(plaintext) => match String::from_utf8(plaintext) {
                Ok(text) => DecryptOutcome::Decrypted(text),
                Err(_) => DecryptOutcome::Legacy,
            },
            Err(_) => DecryptOutcome::Legacy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> Cipher {
        Cipher::new("test-secret")
    }

    #[test]
    fn roundtrip() {
        let c = cipher();
        let encrypted = c.encrypt("a private thought").unwrap();
        assert_ne!(encrypted, "a private thought");
        assert_eq!(c.decrypt(&encrypted), "a private thought");
    }

    #[test]
    fn roundtrip_unicode() {
        let c = cipher();
        let text = "сегодня был тяжёлый день 🌧";
        let encrypted = c.encrypt(text).unwrap();
        assert_eq!(c.decrypt(&encrypted), text);
    }

    #[test]
    fn empty_string_identity() {
        let c = cipher();
        assert_eq!(c.encrypt("").unwrap(), "");
        assert_eq!(c.decrypt(""), "");
    }

    #[test]
    fn legacy_plaintext_passes_through() {
        let c = cipher();
        assert_eq!(c.decrypt("plain-unencrypted-text"), "plain-unencrypted-text");
        assert_eq!(c.try_decrypt("plain-unencrypted-text"), DecryptOutcome::Legacy);
    }

    #[test]
    fn wrong_key_reads_as_legacy() {
        let encrypted = Cipher::new("key-a").encrypt("secret").unwrap();
        let other = Cipher::new("key-b");
        assert_eq!(other.try_decrypt(&encrypted), DecryptOutcome::Legacy);
        assert_eq!(other.decrypt(&encrypted), encrypted);
    }

    #[test]
    fn tampered_ciphertext_reads_as_legacy() {
        let c = cipher();
        let encrypted = c.encrypt("secret").unwrap();
        let mut blob = URL_SAFE.decode(&encrypted).unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0x01;
        let tampered = URL_SAFE.encode(blob);
        assert_eq!(c.try_decrypt(&tampered), DecryptOutcome::Legacy);
    }

    #[test]
    fn key_is_deterministic_per_secret() {
        let encrypted = Cipher::new("shared-secret").encrypt("note").unwrap();
        assert_eq!(Cipher::new("shared-secret").decrypt(&encrypted), "note");
    }

    #[test]
    fn nonces_differ_between_calls() {
        let c = cipher();
        let a = c.encrypt("same input").unwrap();
        let b = c.encrypt("same input").unwrap();
        assert_ne!(a, b);
        assert_eq!(c.decrypt(&a), c.decrypt(&b));
    }

    #[test]
    fn debug_is_redacted() {
        let debug = format!("{:?}", cipher());
        assert_eq!(debug, "Cipher([REDACTED])");
    }
}
