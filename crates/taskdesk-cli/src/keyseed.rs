//! # Key Seed Handling
//!
//! The signing keypair is derived from a 32-byte seed supplied as
//! unpadded base64url, the same alphabet tokens themselves use. A stable
//! seed keeps emailed links valid across restarts.

use anyhow::{bail, Context};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use taskdesk_token::TokenKeypair;

/// Decode a base64url seed string into a keypair.
pub fn keypair_from_seed(seed: &str) -> anyhow::Result<TokenKeypair> {
    let bytes = URL_SAFE_NO_PAD
        .decode(seed.trim())
        .context("key seed is not valid base64url")?;
    let seed: [u8; 32] = match bytes.try_into() {
        Ok(seed) => seed,
        Err(bytes) => bail!("key seed must decode to 32 bytes, got {}", bytes.len()),
    };
    Ok(TokenKeypair::from_seed(&seed))
}

/// Seed keypair if given, otherwise a fresh random one (with a warning,
/// since restart invalidates outstanding links).
pub fn keypair_or_generate(seed: Option<&str>) -> anyhow::Result<TokenKeypair> {
    match seed {
        Some(seed) => keypair_from_seed(seed),
        None => {
            tracing::warn!("no --key-seed given; emailed action links will not survive a restart");
            Ok(TokenKeypair::generate())
        }
    }
}
