//! # Token Subcommand
//!
//! Mint and inspect action tokens from the command line, mainly for
//! testing emailed links against a running server without going through
//! the acceptance flow.

use anyhow::Context;
use clap::{Args, Subcommand};

use taskdesk_core::{RequestId, Timestamp, Username};
use taskdesk_token::{ActionPayload, TokenAction, DEFAULT_TTL_SECS};

use crate::keyseed::keypair_from_seed;

/// Arguments for the token subcommand.
#[derive(Args, Debug)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Mint a signed action token.
    Mint {
        /// base64url-encoded 32-byte signing seed.
        #[arg(long)]
        key_seed: String,
        /// The request the token acts on.
        #[arg(long)]
        request_id: String,
        /// approve or deny.
        #[arg(long)]
        action: String,
        /// Lifetime in seconds.
        #[arg(long, default_value_t = DEFAULT_TTL_SECS)]
        ttl: i64,
        /// Admin the token is attributed to.
        #[arg(long)]
        issued_by: Option<String>,
    },
    /// Verify a token and print its payload.
    Verify {
        /// base64url-encoded 32-byte signing seed.
        #[arg(long)]
        key_seed: String,
        /// The token to verify.
        token: String,
    },
}

fn parse_action(s: &str) -> anyhow::Result<TokenAction> {
    match s {
        "approve" => Ok(TokenAction::Approve),
        "deny" => Ok(TokenAction::Deny),
        other => anyhow::bail!("unknown action {other:?}, expected approve or deny"),
    }
}

/// Execute the token subcommand, printing the result to stdout.
pub fn run(args: TokenArgs) -> anyhow::Result<()> {
    match args.command {
        TokenCommand::Mint {
            key_seed,
            request_id,
            action,
            ttl,
            issued_by,
        } => {
            let keypair = keypair_from_seed(&key_seed)?;
            let request_id = RequestId::parse(&request_id).context("invalid --request-id")?;
            let action = parse_action(&action)?;
            let issued_by = issued_by
                .map(Username::new)
                .transpose()
                .context("invalid --issued-by")?;
            let payload = ActionPayload::new(request_id, action, Timestamp::now(), ttl, issued_by);
            let token = keypair.mint(&payload).context("mint token")?;
            println!("{token}");
        }
        TokenCommand::Verify { key_seed, token } => {
            let keypair = keypair_from_seed(&key_seed)?;
            let payload = keypair
                .verifier()
                .verify(&token, Timestamp::now())
                .context("token rejected")?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("approve").unwrap(), TokenAction::Approve);
        assert_eq!(parse_action("deny").unwrap(), TokenAction::Deny);
        assert!(parse_action("Approve").is_err());
        assert!(parse_action("").is_err());
    }
}
