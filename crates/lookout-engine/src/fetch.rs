use tokio::time::sleep;
use tracing::instrument;

use lookout_core::{AccountId, DashboardError, FetchRequest, NoticeLevel, UiEvent};

use crate::dashboard::Dashboard;

/// Coarse well-formedness floor for target user ids, counted in characters
/// rather than bytes.
const MIN_USER_ID_CHARS: usize = 3;

impl Dashboard {
    /// Run a fetch job for one account and target user. The gateway call
    /// holds until the backend's crawl-and-store cycle finishes; afterwards
    /// the catalog and statistics are reloaded once the settle delay passes.
    ///
    /// Returns the backend's summary message.
    #[instrument(skip(self), fields(user_id = %user_id.trim()))]
    pub async fn request_fetch(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<String, DashboardError> {
        // 1. Check the controls before any network traffic.
        let account_id = account_id.trim();
        let user_id = user_id.trim();
        if account_id.is_empty() {
            return Err(self.reject("an account must be selected"));
        }
        if user_id.is_empty() {
            return Err(self.reject("a target user id is required"));
        }
        if user_id.chars().count() < MIN_USER_ID_CHARS {
            return Err(self.reject("user id is too short"));
        }

        let request = FetchRequest {
            account_id: AccountId::from_raw(account_id),
            user_id: user_id.to_string(),
        };

        // 2. One blocking job call. The loading flag is advisory and does
        //    not stop further gestures from queuing.
        self.send_event(UiEvent::LoadingChanged { active: true });
        let outcome = self.gateway.trigger_fetch(&request).await;
        self.send_event(UiEvent::LoadingChanged { active: false });

        let message = match outcome {
            Ok(message) => message,
            Err(err) => {
                self.notify(NoticeLevel::Error, err.user_message());
                return Err(err);
            }
        };
        self.notify(NoticeLevel::Success, message.clone());

        // 3. Give backend writes a moment to land, then reload what the job
        //    may have changed.
        sleep(self.settle_delay).await;
        self.load_contents().await;
        self.refresh_statistics().await;

        Ok(message)
    }
}
