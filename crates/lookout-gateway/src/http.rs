use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use lookout_core::errors::DashboardError;
use lookout_core::ids::{AccountId, NoteId};
use lookout_core::models::{Account, ContentItem, FetchRequest, NewAccount, StatisticsSnapshot};

use crate::Gateway;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire envelope around every backend payload. `code` zero means success;
/// anything else is a backend-reported failure whose `message` goes to the
/// operator verbatim.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<T>,
}

/// Production gateway over HTTP.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_connect_timeout(base_url, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_connect_timeout(base_url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(connect_timeout)
                .build()
                .expect("failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and unwrap the envelope, requiring a `data` payload.
    async fn request<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, DashboardError> {
        let envelope: Envelope<T> = send_and_decode(req).await?;
        envelope
            .data
            .ok_or_else(|| DashboardError::transport("response envelope missing data"))
    }

    /// Send a request where only the envelope outcome matters. Returns the
    /// backend's message; any `data` payload is ignored.
    async fn request_message(&self, req: RequestBuilder) -> Result<String, DashboardError> {
        let envelope: Envelope<serde_json::Value> = send_and_decode(req).await?;
        Ok(envelope.message)
    }
}

/// The backend pairs error envelopes with 4xx/5xx statuses, so the body is
/// decoded regardless of HTTP status and `code` decides the outcome. Only a
/// body that isn't an envelope at all becomes a transport error.
async fn send_and_decode<T: DeserializeOwned>(
    req: RequestBuilder,
) -> Result<Envelope<T>, DashboardError> {
    let resp = req
        .send()
        .await
        .map_err(|e| DashboardError::Transport(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .map_err(|e| DashboardError::Transport(e.to_string()))?;

    let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|_| {
        DashboardError::transport(format!("undecodable response (status {})", status.as_u16()))
    })?;

    if envelope.code != 0 {
        return Err(DashboardError::Backend {
            code: envelope.code,
            message: envelope.message,
        });
    }
    Ok(envelope)
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_accounts(&self) -> Result<Vec<Account>, DashboardError> {
        self.request(self.client.get(self.url("/api/accounts"))).await
    }

    async fn add_account(&self, account: &NewAccount) -> Result<(), DashboardError> {
        // Cookie material is exposed here only, while the body is built.
        let body = serde_json::json!({
            "username": account.username,
            "user_id": account.user_id,
            "cookie": account.cookie.expose_secret(),
            "a1": account.a1.as_ref().map(|a| a.expose_secret()).unwrap_or(""),
        });
        self.request_message(self.client.post(self.url("/api/accounts")).json(&body))
            .await
            .map(|_| ())
    }

    async fn delete_account(&self, account_id: &AccountId) -> Result<(), DashboardError> {
        let url = self.url(&format!("/api/accounts/{account_id}"));
        self.request_message(self.client.delete(url)).await.map(|_| ())
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    async fn trigger_fetch(&self, request: &FetchRequest) -> Result<String, DashboardError> {
        // Blocking on the backend side: the response only arrives once the
        // whole fetch run has finished.
        self.request_message(self.client.post(self.url("/api/fetch-content")).json(request))
            .await
    }

    async fn list_user_contents(&self, user_id: &str) -> Result<Vec<ContentItem>, DashboardError> {
        self.request(self.client.get(self.url(&format!("/api/contents/user/{user_id}"))))
            .await
    }

    async fn get_content(&self, note_id: &NoteId) -> Result<ContentItem, DashboardError> {
        self.request(self.client.get(self.url(&format!("/api/contents/{note_id}"))))
            .await
    }

    #[instrument(skip(self, note_id), fields(note_id = %note_id))]
    async fn convert_content(&self, note_id: &NoteId) -> Result<ContentItem, DashboardError> {
        self.request(self.client.post(self.url(&format!("/api/convert-content/{note_id}"))))
            .await
    }

    async fn get_statistics(&self) -> Result<StatisticsSnapshot, DashboardError> {
        self.request(self.client.get(self.url("/api/statistics"))).await
    }
}
