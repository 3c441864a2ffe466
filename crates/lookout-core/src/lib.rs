pub mod errors;
pub mod events;
pub mod ids;
pub mod models;

pub use errors::DashboardError;
pub use events::{NoticeLevel, UiEvent};
pub use ids::{AccountId, NoteId};
pub use models::{
    Account, ContentItem, ContentType, ConversionStatus, FetchRequest, FilterCriteria,
    NewAccount, StatisticsSnapshot, StatusCounts, TypeCounts,
};
