//! # Email Notifier
//!
//! Renders the acceptance message: who accepted what, plus approve/deny
//! links carrying freshly minted capability tokens and a link to the admin
//! page. Transport is behind the `Mailer` trait; the default `LogMailer`
//! writes the message to the log, which is what the original service did
//! when SMTP was unconfigured. Real SMTP delivery stays an external
//! collaborator.

use std::sync::Arc;

use async_trait::async_trait;

use taskdesk_core::Timestamp;
use taskdesk_token::{ActionPayload, TokenAction, TokenKeypair, DEFAULT_TTL_SECS};

use crate::event::{AcceptedNotification, AdminRecipient};
use crate::notifier::{Notifier, NotifyError};

/// A rendered, ready-to-send message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Destination address.
    pub to: String,
    /// Message subject.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Message transport. Implementations must not block the caller on
/// anything slower than handing the message off.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand one message to the transport.
    async fn send(&self, email: OutboundEmail) -> Result<(), NotifyError>;
}

/// Writes outbound messages to the log instead of delivering them.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), NotifyError> {
        tracing::info!(to = %email.to, subject = %email.subject, "outbound email (log transport)");
        tracing::debug!(body = %email.body, "outbound email body");
        Ok(())
    }
}

/// Notifier that emails the admin an acceptance summary with
/// approve/deny capability links.
pub struct EmailNotifier {
    keypair: Arc<TokenKeypair>,
    base_url: String,
    mailer: Arc<dyn Mailer>,
}

impl EmailNotifier {
    /// Build a notifier. `base_url` is the externally reachable origin
    /// used in links; a trailing slash is tolerated.
    pub fn new(keypair: Arc<TokenKeypair>, base_url: impl Into<String>, mailer: Arc<dyn Mailer>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            keypair,
            base_url,
            mailer,
        }
    }

    fn action_link(&self, token: &str) -> String {
        // redirect=1 so the click performs the action and lands on the
        // admin page rather than a bare JSON response.
        format!("{}/api/requests/action?t={token}&redirect=1", self.base_url)
    }

    /// Render the message for an event. Public so tests can assert on the
    /// body without a transport.
    pub fn render(
        &self,
        recipient: &AdminRecipient,
        event: &AcceptedNotification,
    ) -> Result<OutboundEmail, NotifyError> {
        let now = Timestamp::now();
        let mint = |action: TokenAction| -> Result<String, NotifyError> {
            let payload = ActionPayload::new(
                event.request_id,
                action,
                now,
                DEFAULT_TTL_SECS,
                recipient.username.clone(),
            );
            self.keypair
                .mint(&payload)
                .map_err(|e| NotifyError::Delivery(format!("token mint: {e}")))
        };
        let approve_link = self.action_link(&mint(TokenAction::Approve)?);
        let deny_link = self.action_link(&mint(TokenAction::Deny)?);
        let admin_page = format!("{}/request-form/admin", self.base_url);

        let subject = format!("Request Accepted: {}", event.project);
        let body = format!(
            "Request Accepted\n\n\
             Project: {}\n\
             Requester: {}\n\
             Accepted By: {}\n\n\
             Approve: {}\n\
             Deny: {}\n\
             Admin Page: {}\n\
             (Links valid 24h. Actions are single-use; if already processed they have no effect.)\n\n\
             Request ID: {}",
            event.project,
            event.requester,
            event.accepted_by,
            approve_link,
            deny_link,
            admin_page,
            event.request_id,
        );

        Ok(OutboundEmail {
            to: recipient.email.clone(),
            subject,
            body,
        })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify_accepted(
        &self,
        recipient: &AdminRecipient,
        event: &AcceptedNotification,
    ) -> Result<(), NotifyError> {
        let email = self.render(recipient, event)?;
        self.mailer.send(email).await
    }
}
