//! Remote gateway: the only layer that talks to the monitoring backend.
//!
//! The `Gateway` trait defines the typed operations the dashboard needs.
//! `HttpGateway` is the production implementation speaking the backend's
//! JSON envelope protocol; `MockGateway` returns scripted responses for
//! deterministic tests.

use async_trait::async_trait;

use lookout_core::errors::DashboardError;
use lookout_core::ids::{AccountId, NoteId};
use lookout_core::models::{Account, ContentItem, FetchRequest, NewAccount, StatisticsSnapshot};

pub mod http;
pub mod mock;

pub use http::HttpGateway;
pub use mock::MockGateway;

/// Typed access to the backend. Callers never see URLs, status codes, or
/// envelope framing; they get domain values or a `DashboardError`.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<Account>, DashboardError>;

    async fn add_account(&self, account: &NewAccount) -> Result<(), DashboardError>;

    async fn delete_account(&self, account_id: &AccountId) -> Result<(), DashboardError>;

    /// Kick off a blocking fetch run on the backend. Returns the backend's
    /// summary message for verbatim display.
    async fn trigger_fetch(&self, request: &FetchRequest) -> Result<String, DashboardError>;

    async fn list_user_contents(&self, user_id: &str) -> Result<Vec<ContentItem>, DashboardError>;

    async fn get_content(&self, note_id: &NoteId) -> Result<ContentItem, DashboardError>;

    /// Run the server-side conversion for one record and return the record
    /// as the backend now sees it.
    async fn convert_content(&self, note_id: &NoteId) -> Result<ContentItem, DashboardError>;

    async fn get_statistics(&self) -> Result<StatisticsSnapshot, DashboardError>;
}
