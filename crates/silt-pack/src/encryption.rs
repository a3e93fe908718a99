//! Symmetric encryption transform.
//!
//! Uses AES-256-GCM with a fresh random 96-bit nonce per encryption, so
//! repeated encryptions of the same plaintext under the same key produce
//! different ciphertexts and any tampering is detected on decryption. The
//! wire form is `nonce || ciphertext+tag`.
//!
//! Keys come from three places: explicit 32-byte material, URL-safe base64
//! key text (the interchange format), or a password plus numeric seed run
//! through a slow chained-SHA-256 derivation loop. A password without a seed
//! is a construction error — there is no silent default salt.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest as _, Sha256};

use crate::error::{PackError, PackResult};
use crate::transform::Transform;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Number of chained hash rounds in the password derivation loop. High on
/// purpose: derivation should be slow enough to resist brute force.
const KDF_ROUNDS: u32 = 390_000;

/// AES-256-GCM encryption transform.
#[derive(Clone)]
pub struct Encryption {
    key: [u8; KEY_LEN],
}

impl Encryption {
    /// Encryption with explicit 32-byte key material.
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Encryption with a freshly generated random key.
    ///
    /// Export the key with [`Encryption::key_text`] or the ciphertext is
    /// unrecoverable once this value is dropped.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    /// Encryption from URL-safe base64 key text, the interchange format
    /// produced by [`Encryption::key_text`].
    pub fn from_key_text(text: &str) -> PackResult<Self> {
        let bytes = URL_SAFE
            .decode(text)
            .map_err(|e| PackError::Construction(format!("invalid key text: {e}")))?;
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            PackError::Construction(format!("key must be {KEY_LEN} bytes, got {}", v.len()))
        })?;
        Ok(Self { key })
    }

    /// Derive a key from a password and a numeric seed.
    ///
    /// The seed is mandatory: it salts the derivation, and omitting it would
    /// silently weaken every password-derived key the same way. The loop is
    /// `KDF_ROUNDS` chained SHA-256 applications over `password || salt`,
    /// where `salt = SHA-256(seed as 16 big-endian bytes)`.
    pub fn from_password(password: impl AsRef<[u8]>, seed: u64) -> Self {
        let mut seed_bytes = [0u8; 16];
        seed_bytes[8..].copy_from_slice(&seed.to_be_bytes());
        let salt = sha256(&seed_bytes);

        let mut state = Vec::with_capacity(password.as_ref().len() + salt.len());
        state.extend_from_slice(password.as_ref());
        state.extend_from_slice(&salt);
        let mut key = sha256(&state);
        for _ in 1..KDF_ROUNDS {
            key = sha256(&key);
        }
        Self { key }
    }

    /// The key as URL-safe base64 text for interchange.
    pub fn key_text(&self) -> String {
        URL_SAFE.encode(self.key)
    }
}

impl std::fmt::Debug for Encryption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("Encryption").finish_non_exhaustive()
    }
}

impl Transform for Encryption {
    fn name(&self) -> &str {
        "encryption"
    }

    fn forward(&self, input: &[u8]) -> PackResult<Vec<u8>> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), input)
            .map_err(|e| PackError::EncryptionFailed(e.to_string()))?;
        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn backward(&self, output: &[u8]) -> PackResult<Vec<u8>> {
        if output.len() < NONCE_LEN {
            return Err(PackError::DecryptionFailed(
                "ciphertext shorter than nonce".to_string(),
            ));
        }
        let (nonce, ciphertext) = output.split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| PackError::DecryptionFailed("bad key or tampered ciphertext".to_string()))
    }
}

fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_with_generated_key() {
        let encryption = Encryption::generate();
        let data = b"attack at dawn".to_vec();
        let sealed = encryption.forward(&data).unwrap();
        assert_ne!(sealed, data);
        assert_eq!(encryption.backward(&sealed).unwrap(), data);
    }

    #[test]
    fn repeated_encryption_differs() {
        // Fresh nonce per call: identical plaintext must not produce
        // identical ciphertext.
        let encryption = Encryption::generate();
        let a = encryption.forward(b"same plaintext").unwrap();
        let b = encryption.forward(b"same plaintext").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let sealed = Encryption::generate().forward(b"secret").unwrap();
        let other = Encryption::generate();
        let err = other.backward(&sealed).unwrap_err();
        assert!(matches!(err, PackError::DecryptionFailed(_)));
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let encryption = Encryption::generate();
        let mut sealed = encryption.forward(b"integrity").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert!(matches!(
            encryption.backward(&sealed).unwrap_err(),
            PackError::DecryptionFailed(_)
        ));
    }

    #[test]
    fn truncated_input_fails() {
        let encryption = Encryption::generate();
        let err = encryption.backward(&[0u8; 5]).unwrap_err();
        assert!(matches!(err, PackError::DecryptionFailed(_)));
    }

    #[test]
    fn key_text_interchange() {
        let original = Encryption::generate();
        let sealed = original.forward(b"portable").unwrap();
        let imported = Encryption::from_key_text(&original.key_text()).unwrap();
        assert_eq!(imported.backward(&sealed).unwrap(), b"portable");
    }

    #[test]
    fn invalid_key_text_is_construction_error() {
        assert!(matches!(
            Encryption::from_key_text("not base64 !!!").unwrap_err(),
            PackError::Construction(_)
        ));
        // Valid base64 but wrong length.
        assert!(matches!(
            Encryption::from_key_text("c2hvcnQ=").unwrap_err(),
            PackError::Construction(_)
        ));
    }

    #[test]
    fn password_derivation_is_deterministic() {
        let a = Encryption::from_password("hunter2", 7);
        let b = Encryption::from_password("hunter2", 7);
        assert_eq!(a.key_text(), b.key_text());
    }

    #[test]
    fn seed_changes_derived_key() {
        let a = Encryption::from_password("hunter2", 7);
        let b = Encryption::from_password("hunter2", 8);
        assert_ne!(a.key_text(), b.key_text());
    }

    #[test]
    fn password_derived_keys_interoperate() {
        let writer = Encryption::from_password("correct horse", 42);
        let reader = Encryption::from_password("correct horse", 42);
        let sealed = writer.forward(b"battery staple").unwrap();
        assert_eq!(reader.backward(&sealed).unwrap(), b"battery staple");
    }

    #[test]
    fn debug_does_not_leak_key() {
        let encryption = Encryption::generate();
        let debug = format!("{encryption:?}");
        assert!(!debug.contains(&encryption.key_text()));
    }
}
