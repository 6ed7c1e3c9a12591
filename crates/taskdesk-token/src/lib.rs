//! # taskdesk-token — Capability Tokens for Email Actions
//!
//! When a request is accepted, the acceptance email carries approve/deny
//! links that must work without an interactive session. Each link embeds a
//! capability token: a signed, time-boxed credential binding one action
//! (`approve` or `deny`) to one request id.
//!
//! ## Wire Format
//!
//! ```text
//! base64url(canonical-json-payload) "." base64url(ed25519-signature)
//! ```
//!
//! The payload is serialized through `CanonicalBytes` (RFC 8785) before
//! signing, so the byte sequence under the signature is deterministic.
//! Verification checks the signature **before** parsing the payload, then
//! rejects expired tokens.
//!
//! ## Security Invariant
//!
//! - The token is the capability: possession authorizes the action, with
//!   no session predicate behind it. Anything reachable from token input
//!   is therefore verified-then-parsed, never parsed-then-verified.
//! - Private keys are never serialized or logged. `TokenKeypair` does not
//!   implement `Serialize` and its `Debug` output is redacted.

pub mod payload;
pub mod signer;

pub use payload::{ActionPayload, TokenAction, DEFAULT_TTL_SECS};
pub use signer::{TokenError, TokenKeypair, TokenVerifier};
