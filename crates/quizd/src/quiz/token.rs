//! Quiz token codec.
//!
//! The cache key for a pending answer is handed to the client as an
//! opaque token: XChaCha20-Poly1305 over the composite key, random
//! nonce per token, encoded as url-safe base64 of `nonce || ciphertext`.
//! The AEAD tag means any bit flip fails authentication, so decoding
//! fails closed on tampered or malformed input.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chacha20poly1305::{
    Key, XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use lexiquiz_common::QuizError;
use lexiquiz_common::constants::QUIZ_KEY_TAG;

const NONCE_LEN: usize = 24;

/// Composite cache key for one pending quiz answer.
///
/// Rendered as `quiz:{owner_id}:{word_id}:{item_id}` so the grading
/// path can re-derive the owning word without a second lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizKey {
    pub owner_id: Uuid,
    pub word_id: Uuid,
    pub item_id: Uuid,
}

impl QuizKey {
    /// Render the colon-delimited cache key, namespace tag first
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            QUIZ_KEY_TAG, self.owner_id, self.word_id, self.item_id
        )
    }

    /// Parse a decrypted cache key, rejecting anything that is not
    /// exactly `quiz:{uuid}:{uuid}:{uuid}`
    pub fn parse(plain: &str) -> Result<Self, QuizError> {
        let mut parts = plain.split(':');
        let tag = parts.next().ok_or(QuizError::InvalidToken)?;
        if tag != QUIZ_KEY_TAG {
            return Err(QuizError::InvalidToken);
        }

        let owner_id = parse_uuid(parts.next())?;
        let word_id = parse_uuid(parts.next())?;
        let item_id = parse_uuid(parts.next())?;
        if parts.next().is_some() {
            return Err(QuizError::InvalidToken);
        }

        Ok(Self {
            owner_id,
            word_id,
            item_id,
        })
    }
}

fn parse_uuid(part: Option<&str>) -> Result<Uuid, QuizError> {
    part.and_then(|p| Uuid::parse_str(p).ok())
        .ok_or(QuizError::InvalidToken)
}

/// Stateless symmetric codec between cache keys and client tokens
pub struct TokenCodec {
    cipher: XChaCha20Poly1305,
}

impl TokenCodec {
    /// Derive the AEAD key from the configured secret
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(digest.as_slice())),
        }
    }

    /// Encrypt a plaintext cache key into a client-facing token
    pub fn encrypt(&self, plain: &str) -> Result<String, QuizError> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(XNonce::from_slice(&nonce), plain.as_bytes())
            .map_err(|e| QuizError::Internal(format!("token encryption failed: {e}")))?;

        let mut raw = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&nonce);
        raw.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(raw))
    }

    /// Decrypt a client token back into the plaintext cache key.
    ///
    /// Fails closed: malformed base64, a truncated payload, a wrong
    /// key, or any tampered byte all come back as
    /// [`QuizError::InvalidToken`] with no further detail.
    pub fn decrypt(&self, token: &str) -> Result<String, QuizError> {
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| QuizError::InvalidToken)?;

        // Nonce plus at least the 16-byte Poly1305 tag
        if raw.len() < NONCE_LEN + 16 {
            return Err(QuizError::InvalidToken);
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);

        let plain = self
            .cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| QuizError::InvalidToken)?;

        String::from_utf8(plain).map_err(|_| QuizError::InvalidToken)
    }
}
