use tracing::instrument;

use lookout_core::{ContentItem, ConversionStatus, DashboardError, NoticeLevel, UiEvent};

use crate::dashboard::Dashboard;

impl Dashboard {
    /// Convert the record currently open in the detail view and reconcile
    /// the catalog with whatever the backend sends back. The client never
    /// applies an optimistic status transition; the returned record is the
    /// whole truth, including a `failed` status when the converter gave up.
    #[instrument(skip(self))]
    pub async fn request_conversion(&self) -> Result<ContentItem, DashboardError> {
        // Only reachable from an open detail view; otherwise a quiet no-op.
        let note_id = self.selection().ok_or(DashboardError::NoSelection)?;

        let updated = match self.gateway.convert_content(&note_id).await {
            Ok(item) => item,
            Err(err) => {
                self.notify(NoticeLevel::Error, err.user_message());
                return Err(err);
            }
        };

        // Catalog first, so the detail re-render and the list agree on what
        // the record now says. No refetch: the conversion response already
        // carries the current record.
        self.catalog.upsert(updated.clone());
        self.send_event(UiEvent::ContentUpdated {
            note_id: updated.note_id.clone(),
        });
        self.send_event(UiEvent::DetailOpened {
            item: updated.clone(),
        });

        match updated.conversion_status {
            ConversionStatus::Completed => {
                self.notify(NoticeLevel::Success, "conversion completed")
            }
            ConversionStatus::Failed => self.notify(NoticeLevel::Error, "conversion failed"),
            _ => {}
        }

        // Status counts shifted; refresh opportunistically.
        self.refresh_statistics().await;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::broadcast;

    use lookout_core::{ContentType, NoteId, StatisticsSnapshot};
    use lookout_gateway::MockGateway;

    use super::*;

    fn item(note_id: &str) -> ContentItem {
        ContentItem {
            note_id: NoteId::from_raw(note_id),
            user_id: "u1".to_string(),
            username: "blogger-u1".to_string(),
            title: format!("title-{note_id}"),
            desc: String::new(),
            link: format!("https://example.com/{note_id}"),
            content_type: ContentType::Video,
            publish_time: 1_700_000_000,
            img_urls: Vec::new(),
            video_url: Some("https://example.com/v.mp4".to_string()),
            conversion_status: ConversionStatus::Pending,
            converted_text: None,
            created_at: None,
        }
    }

    fn setup() -> (Arc<MockGateway>, Dashboard) {
        let mock = Arc::new(MockGateway::new());
        let dashboard = Dashboard::new(mock.clone());
        (mock, dashboard)
    }

    fn select(dashboard: &Dashboard, note_id: &str) {
        *dashboard.selection.write() = Some(NoteId::from_raw(note_id));
    }

    fn drain(rx: &mut broadcast::Receiver<UiEvent>) -> Vec<UiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn conversion_updates_catalog_and_refreshes_stats_once() {
        let (mock, dashboard) = setup();
        dashboard.catalog.replace_all(vec![item("n1")]);
        select(&dashboard, "n1");

        let mut converted = item("n1");
        converted.conversion_status = ConversionStatus::Completed;
        converted.converted_text = Some("hello".to_string());
        mock.script_convert_content(Ok(converted));
        mock.script_get_statistics(Ok(StatisticsSnapshot::default()));
        let mut rx = dashboard.subscribe();

        let updated = dashboard.request_conversion().await.unwrap();

        assert_eq!(updated.conversion_status, ConversionStatus::Completed);
        let stored = dashboard.catalog.get(&NoteId::from_raw("n1")).unwrap();
        assert_eq!(stored.conversion_status, ConversionStatus::Completed);
        assert_eq!(stored.converted_text.as_deref(), Some("hello"));
        assert_eq!(mock.converted_ids()[0].as_str(), "n1");
        assert_eq!(mock.call_counts().get_statistics, 1);

        let events = drain(&mut rx);
        let types: Vec<&str> = events.iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                "content_updated",
                "detail_opened",
                "notice",
                "statistics_updated",
            ]
        );
        match &events[1] {
            UiEvent::DetailOpened { item } => {
                assert_eq!(item.converted_text.as_deref(), Some("hello"));
            }
            other => panic!("expected detail_opened, got: {other:?}"),
        }
        match &events[2] {
            UiEvent::Notice { level, .. } => assert_eq!(*level, NoticeLevel::Success),
            other => panic!("expected notice, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn conversion_without_selection_is_a_quiet_noop() {
        let (mock, dashboard) = setup();
        let mut rx = dashboard.subscribe();

        let err = dashboard.request_conversion().await.unwrap_err();

        assert!(matches!(err, DashboardError::NoSelection));
        assert_eq!(mock.call_counts().convert_content, 0);
        assert_eq!(mock.call_counts().get_statistics, 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn conversion_failure_leaves_catalog_untouched() {
        let (mock, dashboard) = setup();
        dashboard.catalog.replace_all(vec![item("n1")]);
        select(&dashboard, "n1");
        mock.script_convert_content(Err(DashboardError::Backend {
            code: -1,
            message: "转换服务不可用".to_string(),
        }));
        let mut rx = dashboard.subscribe();

        let err = dashboard.request_conversion().await.unwrap_err();

        assert!(matches!(err, DashboardError::Backend { .. }));
        let stored = dashboard.catalog.get(&NoteId::from_raw("n1")).unwrap();
        assert_eq!(stored.conversion_status, ConversionStatus::Pending);
        assert!(stored.converted_text.is_none());
        assert_eq!(mock.call_counts().get_statistics, 0);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        match &events[0] {
            UiEvent::Notice { level, message } => {
                assert_eq!(*level, NoticeLevel::Error);
                assert_eq!(message, "转换服务不可用");
            }
            other => panic!("expected notice, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn conversion_keeps_list_position_and_neighbors() {
        let (mock, dashboard) = setup();
        dashboard
            .catalog
            .replace_all(vec![item("n1"), item("n2"), item("n3")]);
        select(&dashboard, "n2");

        let mut converted = item("n2");
        converted.conversion_status = ConversionStatus::Completed;
        converted.converted_text = Some("middle".to_string());
        mock.script_convert_content(Ok(converted));
        mock.script_get_statistics(Ok(StatisticsSnapshot::default()));

        dashboard.request_conversion().await.unwrap();

        let snapshot = dashboard.catalog.snapshot();
        let ids: Vec<&str> = snapshot.iter().map(|i| i.note_id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n2", "n3"]);
        assert_eq!(snapshot[1].conversion_status, ConversionStatus::Completed);
        assert_eq!(snapshot[0].conversion_status, ConversionStatus::Pending);
        assert_eq!(snapshot[2].conversion_status, ConversionStatus::Pending);
    }

    #[tokio::test]
    async fn returned_failed_record_is_stored_and_reported() {
        let (mock, dashboard) = setup();
        dashboard.catalog.replace_all(vec![item("n1")]);
        select(&dashboard, "n1");

        let mut failed = item("n1");
        failed.conversion_status = ConversionStatus::Failed;
        mock.script_convert_content(Ok(failed));
        mock.script_get_statistics(Ok(StatisticsSnapshot::default()));
        let mut rx = dashboard.subscribe();

        let updated = dashboard.request_conversion().await.unwrap();

        assert_eq!(updated.conversion_status, ConversionStatus::Failed);
        assert_eq!(
            dashboard
                .catalog
                .get(&NoteId::from_raw("n1"))
                .unwrap()
                .conversion_status,
            ConversionStatus::Failed
        );
        // Still a completed round trip: the record is stored and statistics
        // refresh, but the notice reports the failure.
        assert_eq!(mock.call_counts().get_statistics, 1);
        let events = drain(&mut rx);
        let types: Vec<&str> = events.iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                "content_updated",
                "detail_opened",
                "notice",
                "statistics_updated",
            ]
        );
        match &events[2] {
            UiEvent::Notice { level, .. } => assert_eq!(*level, NoticeLevel::Error),
            other => panic!("expected notice, got: {other:?}"),
        }
    }
}
