//! Session token issuance and verification.
//!
//! Tokens are stateless: validity is a pure function of the encrypted
//! envelope and the current time. There is no revocation list; expiry is the
//! only termination mechanism.

use chrono::{DateTime, Duration, Utc};
use rsa::pkcs8::DecodePrivateKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

use crate::config::SessionConfig;
use crate::utils::jwe;

/// Decrypted token payload asserting an identity and its validity window.
/// Timestamps are seconds since the epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    pub sub: String,
    pub username: String,
    pub roles: Vec<String>,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// The verified identity a session asserts.
    pub fn email(&self) -> &str {
        &self.username
    }
}

/// Why a token failed to verify. Never surfaced over HTTP; the session
/// boundary turns every variant into "no identity".
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is invalid")]
    Invalid,

    #[error("token is not yet valid")]
    NotYetValid,

    #[error("token has expired")]
    Expired,
}

#[derive(Clone)]
pub struct TokenService {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(private_key: RsaPrivateKey, issuer: impl Into<String>, ttl_hours: i64) -> Self {
        let public_key = RsaPublicKey::from(&private_key);
        Self {
            private_key,
            public_key,
            issuer: issuer.into(),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Load the RSA keypair from the PEM file named in config. The public
    /// half is derived from the private key.
    pub fn from_pem_file(config: &SessionConfig, issuer: &str) -> Result<Self, anyhow::Error> {
        let private_key_pem = fs::read_to_string(&config.private_key_path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read session private key from {}: {}",
                config.private_key_path,
                e
            )
        })?;

        let private_key = RsaPrivateKey::from_pkcs8_pem(&private_key_pem)
            .map_err(|e| anyhow::anyhow!("Failed to parse session private key: {}", e))?;

        tracing::info!("Token service initialized with RSA-OAEP-256/A256GCM keys");

        Ok(Self::new(private_key, issuer, config.token_ttl_hours))
    }

    /// Issue a token for a verified identity.
    pub fn issue(&self, email: &str) -> Result<String, anyhow::Error> {
        self.issue_at(email, Utc::now())
    }

    fn issue_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String, anyhow::Error> {
        let iat = issued_at.timestamp();
        let claims = SessionClaims {
            iss: self.issuer.clone(),
            sub: email.to_string(),
            username: email.to_string(),
            roles: Vec::new(),
            iat,
            nbf: iat,
            exp: iat + self.ttl.num_seconds(),
        };

        let payload = serde_json::to_vec(&claims)?;
        jwe::encrypt(&self.public_key, &payload)
            .map_err(|e| anyhow::anyhow!("Failed to seal session token: {}", e))
    }

    /// Verify a bearer token. Any failure - malformed input, wrong key,
    /// tampering, expiry - comes back as a typed error, never a panic.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let payload = jwe::decrypt(&self.private_key, token).map_err(|_| TokenError::Invalid)?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Invalid)?;

        let now = now.timestamp();
        if claims.nbf > now {
            return Err(TokenError::NotYetValid);
        }
        if claims.exp <= now {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
