use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::warn;

use lookout_core::{
    ContentItem, DashboardError, FilterCriteria, NoteId, NoticeLevel, StatisticsSnapshot, UiEvent,
};
use lookout_gateway::Gateway;
use lookout_state::{AccountRoster, ContentCatalog};

use crate::surface::{AutoConfirm, ChartSurface, ConfirmPrompt, NullChartSurface};

/// Pause between a successful fetch job and the follow-up reloads, giving
/// backend writes a moment to settle.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// How long a notice stays on screen before a renderer should expire it.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Owns all client-side state and drives every operation behind a UI
/// gesture. Render surfaces subscribe to the event bus and project; they
/// never mutate state themselves.
///
/// One instance is constructed at startup and shared behind an [`Arc`].
/// Methods take `&self`; interior state lives in the catalog, the roster,
/// and a pair of small locks that are never held across an await.
pub struct Dashboard {
    pub(crate) gateway: Arc<dyn Gateway>,
    pub(crate) catalog: ContentCatalog,
    pub(crate) roster: AccountRoster,
    pub(crate) selection: RwLock<Option<NoteId>>,
    pub(crate) last_snapshot: RwLock<Option<StatisticsSnapshot>>,
    pub(crate) confirm: Arc<dyn ConfirmPrompt>,
    pub(crate) charts: Arc<dyn ChartSurface>,
    pub(crate) settle_delay: Duration,
    event_tx: broadcast::Sender<UiEvent>,
}

impl Dashboard {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            gateway,
            catalog: ContentCatalog::new(),
            roster: AccountRoster::new(),
            selection: RwLock::new(None),
            last_snapshot: RwLock::new(None),
            confirm: Arc::new(AutoConfirm),
            charts: Arc::new(NullChartSurface),
            settle_delay: SETTLE_DELAY,
            event_tx,
        }
    }

    pub fn with_confirm(mut self, confirm: Arc<dyn ConfirmPrompt>) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn with_charts(mut self, charts: Arc<dyn ChartSurface>) -> Self {
        self.charts = charts;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Subscribe to state-change events.
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) fn send_event(&self, event: UiEvent) {
        if self.event_tx.send(event).is_err() {
            warn!("no event receivers; event dropped");
        }
    }

    pub(crate) fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        self.send_event(UiEvent::Notice {
            level,
            message: message.into(),
        });
    }

    /// Raise a client-side precondition failure: one notice, no network call.
    pub(crate) fn reject(&self, message: &str) -> DashboardError {
        self.notify(NoticeLevel::Error, message);
        DashboardError::validation(message)
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn roster(&self) -> &AccountRoster {
        &self.roster
    }

    /// The record currently open in the detail view, if any.
    pub fn selection(&self) -> Option<NoteId> {
        self.selection.read().clone()
    }

    pub fn close_detail(&self) {
        *self.selection.write() = None;
    }

    /// Open the detail view for a catalog record. The cached record renders
    /// immediately; a best-effort remote refresh follows so a conversion that
    /// finished since the last bulk load shows its current text.
    pub async fn open_detail(&self, note_id: &NoteId) -> Result<ContentItem, DashboardError> {
        let cached = self
            .catalog
            .get(note_id)
            .ok_or_else(|| DashboardError::NotFound(note_id.to_string()))?;

        *self.selection.write() = Some(note_id.clone());
        self.send_event(UiEvent::DetailOpened {
            item: cached.clone(),
        });

        match self.gateway.get_content(note_id).await {
            Ok(fresh) => {
                self.catalog.upsert(fresh.clone());
                self.send_event(UiEvent::DetailOpened { item: fresh.clone() });
                Ok(fresh)
            }
            Err(err) => {
                warn!(note_id = %note_id, error = %err, "detail refresh failed, keeping cached record");
                Ok(cached)
            }
        }
    }

    /// Rebuild the catalog by listing contents for every monitored user id,
    /// in roster order. A user whose listing fails is skipped so one bad
    /// account does not blank the rest. When every listing fails the previous
    /// catalog is kept and a single notice is raised.
    ///
    /// Returns the resulting catalog size.
    pub async fn load_contents(&self) -> usize {
        let user_ids = self.roster.user_ids();
        let mut gathered = Vec::new();
        let mut failures = 0usize;

        for user_id in &user_ids {
            match self.gateway.list_user_contents(user_id).await {
                Ok(items) => gathered.extend(items),
                Err(err) => {
                    failures += 1;
                    warn!(user_id = %user_id, error = %err, "content listing failed, skipping user");
                }
            }
        }

        if !user_ids.is_empty() && failures == user_ids.len() {
            self.notify(NoticeLevel::Error, "failed to load contents");
            return self.catalog.len();
        }

        let count = self.catalog.replace_all(gathered);
        self.send_event(UiEvent::CatalogReplaced { count });
        count
    }

    /// The filtered list projection for the current filter controls.
    pub fn visible_contents(&self, criteria: &FilterCriteria) -> Vec<ContentItem> {
        self.catalog.filtered(criteria)
    }
}
