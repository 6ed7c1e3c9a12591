//! # taskdesk-cli — Command-Line Interface
//!
//! Structured clap-based CLI over the taskdesk crates.
//!
//! ## Subcommands
//!
//! - `serve` — Run the HTTP API over in-memory backends
//! - `token` — Mint and inspect email action tokens
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no business logic here.

pub mod keyseed;
pub mod serve;
pub mod token;
