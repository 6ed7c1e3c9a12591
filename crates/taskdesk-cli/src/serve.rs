//! # Serve Subcommand
//!
//! Runs the HTTP API over the in-memory store and directory. The
//! directory is seeded with one admin account so the acceptance
//! notification path works out of the box; the notifier renders real
//! signed links and hands them to the log transport.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use taskdesk_api::{router, AppState};
use taskdesk_core::{Role, Username};
use taskdesk_notify::{EmailNotifier, LogMailer};
use taskdesk_store::{MemoryDirectory, MemoryStore, UserAccount};

use crate::keyseed::keypair_or_generate;

/// Arguments for the serve subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Socket address to bind.
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Externally reachable origin used in emailed links.
    #[arg(long, default_value = "http://localhost:3000")]
    pub base_url: String,

    /// base64url-encoded 32-byte signing seed; random when omitted.
    #[arg(long)]
    pub key_seed: Option<String>,

    /// Username of the seeded admin account.
    #[arg(long, default_value = "admin")]
    pub admin_user: String,

    /// Email of the seeded admin account, the acceptance-notification
    /// recipient.
    #[arg(long, default_value = "admin@example.com")]
    pub admin_email: String,
}

/// Run the server until interrupted.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let keypair = Arc::new(keypair_or_generate(args.key_seed.as_deref())?);
    let verifier = keypair.verifier();

    let admin = Username::new(args.admin_user.as_str())
        .with_context(|| format!("invalid --admin-user {:?}", args.admin_user))?;
    let directory = Arc::new(MemoryDirectory::with_accounts(vec![UserAccount {
        username: admin,
        role: Role::Admin,
        email: Some(args.admin_email.clone()),
    }]));

    let notifier = Arc::new(EmailNotifier::new(
        keypair,
        args.base_url.clone(),
        Arc::new(LogMailer),
    ));

    let state = AppState::new(Arc::new(MemoryStore::new()), directory, notifier, verifier);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("bind {}", args.bind))?;
    tracing::info!(bind = %args.bind, base_url = %args.base_url, "taskdesk listening");
    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
