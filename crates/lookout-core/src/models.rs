use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, NoteId};

/// A monitoring account registered with the backend.
///
/// Accounts are never mutated in place: they are created, listed, and
/// deleted. The backend owns `status` and `created_at`; credentials are
/// submit-only and never echoed back into client state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub account_id: AccountId,
    pub username: String,
    /// The platform identity this account monitors.
    pub user_id: String,
    #[serde(default)]
    pub status: String,
    /// Backend bookkeeping timestamp, kept as the wire string.
    #[serde(default)]
    pub created_at: String,
}

/// One fetched post, as held in the content catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    pub note_id: NoteId,
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub link: String,
    pub content_type: ContentType,
    /// Seconds since epoch.
    #[serde(default)]
    pub publish_time: i64,
    #[serde(default)]
    pub img_urls: Vec<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    pub conversion_status: ConversionStatus,
    /// Present iff a conversion has completed at least once. Text from an
    /// earlier successful conversion may remain while a re-conversion is in
    /// flight.
    #[serde(default)]
    pub converted_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Video,
    Image,
    Text,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Image => write!(f, "image"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(Self::Video),
            "image" => Ok(Self::Image),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}

/// Conversion pipeline state as last reported by the backend. The client
/// never advances this on its own; `Processing` is a backend-internal
/// transient that may still appear in listings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for ConversionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown conversion status: {other}")),
        }
    }
}

/// Aggregate counts as computed by the backend. Always replaced wholesale,
/// never merged. Every bucket defaults to zero so a backend that omits a
/// bucket (the live one sends no `processing` count) still deserializes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    #[serde(default)]
    pub total_accounts: u64,
    #[serde(default)]
    pub total_contents: u64,
    #[serde(default)]
    pub content_types: TypeCounts,
    #[serde(default)]
    pub conversion_status: StatusCounts,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeCounts {
    #[serde(default)]
    pub video: u64,
    #[serde(default)]
    pub image: u64,
    #[serde(default)]
    pub text: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub processing: u64,
    #[serde(default)]
    pub failed: u64,
}

/// Submission payload for registering an account. Credentials are held as
/// secrets so they never leak through Debug or logs; the gateway exposes
/// them only while building the request body.
#[derive(Clone, Debug)]
pub struct NewAccount {
    pub username: String,
    pub user_id: String,
    pub cookie: SecretString,
    pub a1: Option<SecretString>,
}

/// Payload for triggering a fetch job: crawl `user_id`'s content using
/// `account_id`'s credentials.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FetchRequest {
    pub account_id: AccountId,
    pub user_id: String,
}

/// Exact-match filter controls for the content list. `None` imposes no
/// constraint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    pub user_id: Option<String>,
    pub content_type: Option<ContentType>,
    pub status: Option<ConversionStatus>,
}

impl FilterCriteria {
    /// Build criteria from raw control values. Blank strings mean "all";
    /// unrecognized type/status strings are treated the same way.
    pub fn from_controls(user_id: &str, content_type: &str, status: &str) -> Self {
        let user_id = user_id.trim();
        Self {
            user_id: (!user_id.is_empty()).then(|| user_id.to_string()),
            content_type: content_type.trim().parse().ok(),
            status: status.trim().parse().ok(),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.user_id.is_none() && self.content_type.is_none() && self.status.is_none()
    }
}
