pub mod dashboard;
pub mod stats;
pub mod surface;

mod accounts;
mod convert;
mod fetch;

pub use dashboard::{Dashboard, NOTICE_TTL, SETTLE_DELAY};
pub use stats::{chart_data, start_stats_ticker, ChartData, ChartSlice, StatTiles, STATS_INTERVAL};
pub use surface::{
    AutoConfirm, ChartSurface, ConfirmPrompt, NullChartSurface, RecordingCharts, ScriptedConfirm,
};
