use std::sync::Arc;

use tokio::sync::broadcast;

use crate::engine::resolver::TrackingResolver;
use crate::models::tracking::TrackingUpdate;
use crate::observability::metrics::Metrics;
use crate::session::SessionRegistry;
use crate::store::InMemoryStore;

pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub resolver: TrackingResolver<InMemoryStore>,
    pub sessions: SessionRegistry,
    pub tracking_updates_tx: broadcast::Sender<TrackingUpdate>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize, search_history_limit: usize) -> Self {
        Self::with_store(
            Arc::new(InMemoryStore::new()),
            event_buffer_size,
            search_history_limit,
        )
    }

    pub fn with_store(
        store: Arc<InMemoryStore>,
        event_buffer_size: usize,
        search_history_limit: usize,
    ) -> Self {
        let (tracking_updates_tx, _unused_rx) = broadcast::channel(event_buffer_size.max(1));

        Self {
            resolver: TrackingResolver::new(store.clone()),
            store,
            sessions: SessionRegistry::new(search_history_limit),
            tracking_updates_tx,
            metrics: Metrics::new(),
        }
    }

    pub fn publish_update(&self, update: TrackingUpdate) {
        self.metrics
            .tracking_updates_total
            .with_label_values(&[update.entity_type.as_str()])
            .inc();
        let _ = self.tracking_updates_tx.send(update);
    }
}
