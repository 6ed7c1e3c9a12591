//! # Token Signing and Verification
//!
//! Ed25519 over canonical payload bytes. The signing input MUST be
//! `&CanonicalBytes` — there is no API for signing raw bytes, which keeps
//! every minted token re-verifiable regardless of which encoder produced
//! the payload JSON.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signer, Verifier};
use thiserror::Error;

use taskdesk_core::{CanonicalBytes, CryptoError, Timestamp};

use crate::payload::ActionPayload;

/// Errors from token verification.
///
/// The HTTP layer collapses all of these into one client-facing
/// "invalid or expired token" response; the variants exist so logs can
/// tell a forged token from a stale one.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Token did not have the `payload.signature` shape, or a part was
    /// not valid base64url.
    #[error("malformed token")]
    Malformed,

    /// Signature did not verify against the service key.
    #[error("bad token signature")]
    BadSignature,

    /// Signature verified but the token is past its expiry.
    #[error("token expired at epoch {expired_at}")]
    Expired {
        /// The `exp` claim of the rejected token.
        expired_at: i64,
    },

    /// Signature verified but the payload JSON did not parse.
    #[error("invalid token payload: {0}")]
    Payload(String),
}

/// The service signing key for action tokens.
///
/// Does not implement `Serialize` — the private key must not leak into
/// logs, responses, or stored records.
pub struct TokenKeypair {
    signing_key: ed25519_dalek::SigningKey,
}

impl TokenKeypair {
    /// Generate a new random keypair.
    ///
    /// A restarted service with a fresh keypair invalidates previously
    /// emailed links; production deployments load a seed instead.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Deterministic keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The verifier half of this keypair.
    pub fn verifier(&self) -> TokenVerifier {
        TokenVerifier {
            verifying_key: self.signing_key.verifying_key(),
        }
    }

    /// Mint a token for the given payload.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError` if the payload cannot be canonicalized —
    /// which for `ActionPayload` (strings and integer seconds only)
    /// indicates a programming error upstream.
    pub fn mint(&self, payload: &ActionPayload) -> Result<String, CryptoError> {
        let canonical = CanonicalBytes::new(payload)
            .map_err(|e| CryptoError::KeyError(format!("payload canonicalization: {e}")))?;
        let sig = self.signing_key.sign(canonical.as_bytes());
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(canonical.as_bytes()),
            URL_SAFE_NO_PAD.encode(sig.to_bytes())
        ))
    }
}

impl std::fmt::Debug for TokenKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenKeypair(<private>)")
    }
}

/// Verifies action tokens against the service public key.
#[derive(Clone)]
pub struct TokenVerifier {
    verifying_key: ed25519_dalek::VerifyingKey,
}

impl TokenVerifier {
    /// Verify a token and return its payload.
    ///
    /// Order matters: decode, check the signature over the raw payload
    /// bytes, and only then parse JSON and check expiry. Attacker-supplied
    /// bytes never reach the JSON parser unauthenticated.
    pub fn verify(&self, token: &str, now: Timestamp) -> Result<ActionPayload, TokenError> {
        let (payload_b64, sig_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
        if sig_b64.contains('.') {
            return Err(TokenError::Malformed);
        }

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let sig_bytes = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|_| TokenError::Malformed)?;
        let sig_arr: [u8; 64] = sig_bytes.try_into().map_err(|_| TokenError::Malformed)?;
        let signature = ed25519_dalek::Signature::from_bytes(&sig_arr);

        self.verifying_key
            .verify(&payload_bytes, &signature)
            .map_err(|_| TokenError::BadSignature)?;

        let payload: ActionPayload = serde_json::from_slice(&payload_bytes)
            .map_err(|e| TokenError::Payload(e.to_string()))?;

        if payload.is_expired(now) {
            return Err(TokenError::Expired {
                expired_at: payload.expires_at,
            });
        }
        Ok(payload)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenVerifier")
    }
}
