use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use lookout_core::{StatisticsSnapshot, UiEvent};

use crate::dashboard::Dashboard;

/// Cadence of the background statistics refresh.
pub const STATS_INTERVAL: Duration = Duration::from_secs(30);

/// The four scalar tiles shown above the charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatTiles {
    pub total_accounts: u64,
    pub total_contents: u64,
    pub completed: u64,
    pub pending: u64,
}

/// One labeled wedge of a doughnut chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: u64,
}

/// Chart inputs derived from one snapshot: a content-type doughnut and a
/// conversion-status doughnut. Buckets are passed through as supplied; their
/// sums are not assumed to match the totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartData {
    pub type_buckets: Vec<ChartSlice>,
    pub status_buckets: Vec<ChartSlice>,
}

/// Derive both doughnuts from a snapshot. The status doughnut shows the
/// three operator-facing buckets; `processing` is a backend-internal
/// transient and is not charted.
pub fn chart_data(snapshot: &StatisticsSnapshot) -> ChartData {
    ChartData {
        type_buckets: vec![
            ChartSlice {
                label: "video",
                value: snapshot.content_types.video,
            },
            ChartSlice {
                label: "image",
                value: snapshot.content_types.image,
            },
            ChartSlice {
                label: "text",
                value: snapshot.content_types.text,
            },
        ],
        status_buckets: vec![
            ChartSlice {
                label: "completed",
                value: snapshot.conversion_status.completed,
            },
            ChartSlice {
                label: "pending",
                value: snapshot.conversion_status.pending,
            },
            ChartSlice {
                label: "failed",
                value: snapshot.conversion_status.failed,
            },
        ],
    }
}

impl Dashboard {
    /// Fetch a fresh snapshot, replacing the previous one wholesale, and
    /// push it to the chart surface. Failure is logged only; the stale
    /// snapshot stays on display instead of blanking.
    pub async fn refresh_statistics(&self) {
        match self.gateway.get_statistics().await {
            Ok(snapshot) => {
                self.charts.render(&chart_data(&snapshot));
                *self.last_snapshot.write() = Some(snapshot.clone());
                self.send_event(UiEvent::StatisticsUpdated { snapshot });
            }
            Err(err) => {
                warn!(error = %err, "statistics refresh failed, keeping last snapshot");
            }
        }
    }

    /// The most recent successfully fetched snapshot, if any.
    pub fn last_snapshot(&self) -> Option<StatisticsSnapshot> {
        self.last_snapshot.read().clone()
    }

    pub fn stat_tiles(&self) -> StatTiles {
        match self.last_snapshot.read().as_ref() {
            Some(snapshot) => StatTiles {
                total_accounts: snapshot.total_accounts,
                total_contents: snapshot.total_contents,
                completed: snapshot.conversion_status.completed,
                pending: snapshot.conversion_status.pending,
            },
            None => StatTiles::default(),
        }
    }
}

/// Spawn the periodic statistics refresh. The interval's immediate first
/// tick is consumed here; the startup refresh is wired by the caller.
pub fn start_stats_ticker(
    dashboard: Arc<Dashboard>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await; // consume first immediate tick

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => dashboard.refresh_statistics().await,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use tokio::task::yield_now;

    use lookout_core::{DashboardError, StatusCounts, TypeCounts};
    use lookout_gateway::MockGateway;

    use crate::surface::RecordingCharts;

    use super::*;

    fn snapshot(accounts: u64, contents: u64) -> StatisticsSnapshot {
        StatisticsSnapshot {
            total_accounts: accounts,
            total_contents: contents,
            content_types: TypeCounts {
                video: 1,
                image: 3,
                text: 1,
            },
            conversion_status: StatusCounts {
                completed: 2,
                pending: 2,
                processing: 0,
                failed: 1,
            },
        }
    }

    fn setup() -> (Arc<MockGateway>, Dashboard) {
        let mock = Arc::new(MockGateway::new());
        let dashboard = Dashboard::new(mock.clone());
        (mock, dashboard)
    }

    async fn wait_for_calls(mock: &MockGateway, expected: usize) {
        for _ in 0..50 {
            if mock.call_counts().get_statistics == expected {
                return;
            }
            yield_now().await;
        }
        panic!(
            "expected {expected} statistics calls, saw {}",
            mock.call_counts().get_statistics
        );
    }

    #[test]
    fn refresh_cadence() {
        assert_eq!(STATS_INTERVAL, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_and_renders_charts() {
        let (mock, dashboard) = setup();
        let charts = Arc::new(RecordingCharts::new());
        let dashboard = dashboard.with_charts(charts.clone());
        mock.script_get_statistics(Ok(snapshot(2, 5)));
        let mut rx = dashboard.subscribe();

        dashboard.refresh_statistics().await;

        let last = dashboard.last_snapshot().unwrap();
        assert_eq!(last.total_accounts, 2);
        assert_eq!(
            dashboard.stat_tiles(),
            StatTiles {
                total_accounts: 2,
                total_contents: 5,
                completed: 2,
                pending: 2,
            }
        );

        let rendered = charts.rendered();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0], chart_data(&snapshot(2, 5)));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type(), "statistics_updated");
    }

    #[tokio::test]
    async fn refresh_failure_keeps_last_snapshot_and_stays_quiet() {
        let (mock, dashboard) = setup();
        mock.script_get_statistics(Ok(snapshot(1, 4)));
        dashboard.refresh_statistics().await;

        mock.script_get_statistics(Err(DashboardError::transport("backend unreachable")));
        mock.script_get_statistics(Err(DashboardError::transport("backend unreachable")));
        let mut rx = dashboard.subscribe();

        dashboard.refresh_statistics().await;
        dashboard.refresh_statistics().await;

        let last = dashboard.last_snapshot().unwrap();
        assert_eq!(last.total_contents, 4);
        assert_eq!(dashboard.stat_tiles().total_contents, 4);
        assert!(rx.try_recv().is_err(), "expected no events after failures");
    }

    #[tokio::test]
    async fn tiles_are_zero_before_first_snapshot() {
        let (_, dashboard) = setup();
        assert_eq!(dashboard.stat_tiles(), StatTiles::default());
        assert!(dashboard.last_snapshot().is_none());
    }

    #[test]
    fn chart_data_passes_buckets_through() {
        let data = chart_data(&snapshot(2, 5));

        let type_labels: Vec<&str> = data.type_buckets.iter().map(|s| s.label).collect();
        assert_eq!(type_labels, vec!["video", "image", "text"]);
        let type_values: Vec<u64> = data.type_buckets.iter().map(|s| s.value).collect();
        assert_eq!(type_values, vec![1, 3, 1]);

        let status_labels: Vec<&str> = data.status_buckets.iter().map(|s| s.label).collect();
        assert_eq!(status_labels, vec!["completed", "pending", "failed"]);
        let status_values: Vec<u64> = data.status_buckets.iter().map(|s| s.value).collect();
        assert_eq!(status_values, vec![2, 2, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_refreshes_on_each_interval() {
        let (mock, dashboard) = setup();
        mock.script_get_statistics(Ok(snapshot(1, 1)));
        mock.script_get_statistics(Ok(snapshot(2, 2)));
        let dashboard = Arc::new(dashboard);
        let cancel = CancellationToken::new();
        let handle =
            start_stats_ticker(dashboard.clone(), Duration::from_secs(30), cancel.clone());

        // Let the task start and swallow the interval's immediate tick.
        for _ in 0..5 {
            yield_now().await;
        }
        assert_eq!(mock.call_counts().get_statistics, 0);

        tokio::time::advance(Duration::from_secs(30)).await;
        wait_for_calls(&mock, 1).await;
        assert_eq!(dashboard.last_snapshot().unwrap().total_accounts, 1);

        tokio::time::advance(Duration::from_secs(30)).await;
        wait_for_calls(&mock, 2).await;
        assert_eq!(dashboard.last_snapshot().unwrap().total_accounts, 2);

        cancel.cancel();
        handle.await.unwrap();
        assert_eq!(mock.call_counts().get_statistics, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_stops_when_cancelled() {
        let (mock, dashboard) = setup();
        let cancel = CancellationToken::new();
        let handle =
            start_stats_ticker(Arc::new(dashboard), Duration::from_secs(30), cancel.clone());

        for _ in 0..5 {
            yield_now().await;
        }
        cancel.cancel();
        handle.await.unwrap();

        tokio::time::advance(Duration::from_secs(120)).await;
        for _ in 0..5 {
            yield_now().await;
        }
        assert_eq!(mock.call_counts().get_statistics, 0);
    }
}
