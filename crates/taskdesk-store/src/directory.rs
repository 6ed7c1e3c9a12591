//! # In-Memory User Directory
//!
//! Backs the acceptance-notification recipient policy: the first admin
//! account carrying a usable email address.

use std::sync::Mutex;

use async_trait::async_trait;

use taskdesk_core::{Role, Username};
use taskdesk_notify::AdminRecipient;
use taskdesk_workflow::{StoreError, UserDirectory};

/// A user account as the directory stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub username: Username,
    pub role: Role,
    /// Missing or blank means the account cannot receive mail.
    pub email: Option<String>,
}

impl UserAccount {
    fn usable_email(&self) -> Option<&str> {
        let email = self.email.as_deref()?.trim();
        if email.is_empty() {
            None
        } else {
            Some(email)
        }
    }
}

/// In-memory user collection, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    accounts: Mutex<Vec<UserAccount>>,
}

impl MemoryDirectory {
    /// An empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory seeded with the given accounts.
    pub fn with_accounts(accounts: Vec<UserAccount>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
        }
    }

    /// Append an account.
    pub fn add(&self, account: UserAccount) {
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.push(account);
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn first_admin_recipient(&self) -> Result<Option<AdminRecipient>, StoreError> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| StoreError::Backend("user directory lock poisoned".to_string()))?;
        Ok(accounts
            .iter()
            .find(|a| a.role == Role::Admin && a.usable_email().is_some())
            .map(|a| AdminRecipient {
                username: Some(a.username.clone()),
                email: a.usable_email().unwrap_or_default().to_string(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str, role: Role, email: Option<&str>) -> UserAccount {
        UserAccount {
            username: Username::new(name).unwrap(),
            role,
            email: email.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_empty_directory_has_no_recipient() {
        let directory = MemoryDirectory::new();
        assert!(directory.first_admin_recipient().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_picks_first_admin_with_email() {
        let directory = MemoryDirectory::with_accounts(vec![
            account("dave", Role::User, Some("dave@example.com")),
            account("root", Role::Admin, None),
            account("ada", Role::Admin, Some("ada@example.com")),
            account("bea", Role::Admin, Some("bea@example.com")),
        ]);
        let recipient = directory.first_admin_recipient().await.unwrap().unwrap();
        assert_eq!(recipient.email, "ada@example.com");
        assert_eq!(recipient.username, Some(Username::new("ada").unwrap()));
    }

    #[tokio::test]
    async fn test_blank_email_is_unusable() {
        let directory = MemoryDirectory::with_accounts(vec![
            account("root", Role::Admin, Some("   ")),
        ]);
        assert!(directory.first_admin_recipient().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_is_trimmed() {
        let directory = MemoryDirectory::new();
        directory.add(account("ada", Role::Admin, Some("  ada@example.com ")));
        let recipient = directory.first_admin_recipient().await.unwrap().unwrap();
        assert_eq!(recipient.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_non_admins_never_selected() {
        let directory = MemoryDirectory::with_accounts(vec![
            account("dave", Role::User, Some("dave@example.com")),
        ]);
        assert!(directory.first_admin_recipient().await.unwrap().is_none());
    }
}
