use serde::{Deserialize, Serialize};

use crate::ids::NoteId;
use crate::models::{ContentItem, StatisticsSnapshot};

/// State-change events broadcast to render surfaces. Surfaces subscribe and
/// project; they never reach back into the catalog mid-write.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    /// The account roster was replaced wholesale.
    #[serde(rename = "roster_replaced")]
    RosterReplaced { count: usize },

    /// The content catalog was replaced wholesale by a bulk load.
    #[serde(rename = "catalog_replaced")]
    CatalogReplaced { count: usize },

    /// A single catalog record changed (conversion result applied).
    #[serde(rename = "content_updated")]
    ContentUpdated { note_id: NoteId },

    /// The detail view should (re-)render this record.
    #[serde(rename = "detail_opened")]
    DetailOpened { item: ContentItem },

    /// A fresh statistics snapshot replaced the previous one.
    #[serde(rename = "statistics_updated")]
    StatisticsUpdated { snapshot: StatisticsSnapshot },

    /// Transient operator feedback. Renderers should expire notices after
    /// `lookout_engine::NOTICE_TTL`.
    #[serde(rename = "notice")]
    Notice { level: NoticeLevel, message: String },

    /// Advisory busy indicator around the blocking fetch call. Does not
    /// inhibit further gestures.
    #[serde(rename = "loading_changed")]
    LoadingChanged { active: bool },
}

impl UiEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RosterReplaced { .. } => "roster_replaced",
            Self::CatalogReplaced { .. } => "catalog_replaced",
            Self::ContentUpdated { .. } => "content_updated",
            Self::DetailOpened { .. } => "detail_opened",
            Self::StatisticsUpdated { .. } => "statistics_updated",
            Self::Notice { .. } => "notice",
            Self::LoadingChanged { .. } => "loading_changed",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}
