use secrecy::SecretString;
use tracing::{debug, instrument};

use lookout_core::{AccountId, DashboardError, NewAccount, NoticeLevel, UiEvent};

use crate::dashboard::Dashboard;

impl Dashboard {
    /// Replace the roster from a fresh listing. On failure the current
    /// roster stays visible and a single notice is raised.
    pub async fn refresh_accounts(&self) -> Result<(), DashboardError> {
        match self.gateway.list_accounts().await {
            Ok(accounts) => {
                let count = self.roster.replace_all(accounts);
                self.send_event(UiEvent::RosterReplaced { count });
                Ok(())
            }
            Err(err) => {
                self.notify(NoticeLevel::Error, err.user_message());
                Err(err)
            }
        }
    }

    /// Register a monitoring account. Required fields are checked before any
    /// network call; on success the roster is re-listed rather than patched
    /// locally, so server-assigned fields never drift.
    #[instrument(skip_all, fields(user_id = %user_id.trim()))]
    pub async fn add_account(
        &self,
        username: &str,
        user_id: &str,
        cookie: &str,
        a1: Option<&str>,
    ) -> Result<(), DashboardError> {
        let username = username.trim();
        let user_id = user_id.trim();
        let cookie = cookie.trim();
        if username.is_empty() || user_id.is_empty() || cookie.is_empty() {
            return Err(self.reject("username, user id, and cookie are required"));
        }

        let account = NewAccount {
            username: username.to_string(),
            user_id: user_id.to_string(),
            cookie: SecretString::from(cookie.to_string()),
            a1: a1
                .map(str::trim)
                .filter(|a1| !a1.is_empty())
                .map(|a1| SecretString::from(a1.to_string())),
        };

        if let Err(err) = self.gateway.add_account(&account).await {
            self.notify(NoticeLevel::Error, err.user_message());
            return Err(err);
        }

        self.notify(NoticeLevel::Success, "account added");
        let _ = self.refresh_accounts().await;
        Ok(())
    }

    /// Delete an account, but only after an explicit confirmation. Declining
    /// is a silent no-op with no network traffic.
    #[instrument(skip(self, account_id), fields(account_id = %account_id))]
    pub async fn delete_account(&self, account_id: &AccountId) -> Result<(), DashboardError> {
        if !self.confirm.confirm("delete this account?").await {
            debug!("account deletion declined");
            return Ok(());
        }

        if let Err(err) = self.gateway.delete_account(account_id).await {
            self.notify(NoticeLevel::Error, err.user_message());
            return Err(err);
        }

        self.notify(NoticeLevel::Success, "account deleted");
        let _ = self.refresh_accounts().await;
        Ok(())
    }
}
