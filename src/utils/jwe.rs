//! Compact JWE envelope: RSA-OAEP-256 key wrap around AES-256-GCM content
//! encryption.
//!
//! Wire form is the five dot-separated base64url segments
//! `header.encrypted_key.iv.ciphertext.tag`. The protected header is fixed;
//! tokens declaring any other algorithm are rejected before any key use.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

const PROTECTED_HEADER: &str = r#"{"alg":"RSA-OAEP-256","enc":"A256GCM","typ":"JWT"}"#;

const CEK_LEN: usize = 32;
const IV_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Deliberately coarse: callers must not be able to distinguish why a token
/// failed to open.
#[derive(Debug, Error)]
pub enum JweError {
    #[error("malformed compact serialization")]
    Malformed,

    #[error("unsupported protected header")]
    UnsupportedHeader,

    #[error("decryption failed")]
    Crypto,
}

#[derive(Deserialize)]
struct JweHeader {
    alg: String,
    enc: String,
    typ: String,
}

/// Seal `plaintext` for the holder of the private key.
pub fn encrypt(public_key: &RsaPublicKey, plaintext: &[u8]) -> Result<String, JweError> {
    let mut rng = OsRng;

    let mut cek = [0u8; CEK_LEN];
    rng.fill_bytes(&mut cek);
    let mut iv = [0u8; IV_LEN];
    rng.fill_bytes(&mut iv);

    let header_b64 = URL_SAFE_NO_PAD.encode(PROTECTED_HEADER.as_bytes());

    let encrypted_key = public_key
        .encrypt(&mut rng, Oaep::new::<Sha256>(), &cek)
        .map_err(|_| JweError::Crypto)?;

    let cipher = Aes256Gcm::new_from_slice(&cek).map_err(|_| JweError::Crypto)?;
    let sealed = cipher
        .encrypt(
            Nonce::from_slice(&iv),
            Payload {
                msg: plaintext,
                aad: header_b64.as_bytes(),
            },
        )
        .map_err(|_| JweError::Crypto)?;

    // aes-gcm appends the tag to the ciphertext; compact JWE carries it as
    // its own segment.
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

    let segments = [
        header_b64,
        URL_SAFE_NO_PAD.encode(encrypted_key),
        URL_SAFE_NO_PAD.encode(iv),
        URL_SAFE_NO_PAD.encode(ciphertext),
        URL_SAFE_NO_PAD.encode(tag),
    ];
    Ok(segments.join("."))
}

/// Open a compact JWE produced by [`encrypt`].
pub fn decrypt(private_key: &RsaPrivateKey, compact: &str) -> Result<Vec<u8>, JweError> {
    let parts: Vec<&str> = compact.split('.').collect();
    let &[header_b64, key_b64, iv_b64, ciphertext_b64, tag_b64] = parts.as_slice() else {
        return Err(JweError::Malformed);
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| JweError::Malformed)?;
    let header: JweHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| JweError::Malformed)?;
    if header.alg != "RSA-OAEP-256" || header.enc != "A256GCM" || header.typ != "JWT" {
        return Err(JweError::UnsupportedHeader);
    }

    let encrypted_key = URL_SAFE_NO_PAD
        .decode(key_b64)
        .map_err(|_| JweError::Malformed)?;
    let iv = URL_SAFE_NO_PAD.decode(iv_b64).map_err(|_| JweError::Malformed)?;
    let ciphertext = URL_SAFE_NO_PAD
        .decode(ciphertext_b64)
        .map_err(|_| JweError::Malformed)?;
    let tag = URL_SAFE_NO_PAD
        .decode(tag_b64)
        .map_err(|_| JweError::Malformed)?;
    if iv.len() != IV_LEN || tag.len() != TAG_LEN {
        return Err(JweError::Malformed);
    }

    let cek = private_key
        .decrypt(Oaep::new::<Sha256>(), &encrypted_key)
        .map_err(|_| JweError::Crypto)?;
    if cek.len() != CEK_LEN {
        return Err(JweError::Crypto);
    }

    let mut sealed = ciphertext;
    sealed.extend_from_slice(&tag);

    let cipher = Aes256Gcm::new_from_slice(&cek).map_err(|_| JweError::Crypto)?;
    cipher
        .decrypt(
            Nonce::from_slice(&iv),
            Payload {
                // AAD is the header exactly as received, per RFC 7516.
                msg: &sealed,
                aad: header_b64.as_bytes(),
            },
        )
        .map_err(|_| JweError::Crypto)
}
