use telemetry::{ReadingUpdate, SensorSnapshot};
use tokio::sync::watch;

/// `is_live` going false marks the readings stale, it does not clear them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StoreView {
    pub snapshot: SensorSnapshot,
    pub is_live: bool,
}

/// Copy-on-read: observers only ever get copies of the view.
pub struct SnapshotStore {
    view: StoreView,
    tx: watch::Sender<StoreView>,
}

impl SnapshotStore {
    pub fn new() -> SnapshotStore {
        let (tx, _) = watch::channel(StoreView::default());

        SnapshotStore {
            view: StoreView::default(),
            tx,
        }
    }

    pub fn apply_update(&mut self, update: &ReadingUpdate) {
        self.view.snapshot.merge(update);
        let _ = self.tx.send(self.view);
    }

    pub fn set_live(&mut self, live: bool) {
        if self.view.is_live == live {
            return;
        }

        self.view.is_live = live;
        let _ = self.tx.send(self.view);
    }

    pub fn read(&self) -> StoreView {
        self.view
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreView> {
        self.tx.subscribe()
    }
}

impl Default for SnapshotStore {
    fn default() -> SnapshotStore {
        SnapshotStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: Option<f64>, ts: i64) -> ReadingUpdate {
        ReadingUpdate {
            temperature,
            humidity: None,
            light: None,
            vibration: None,
            relay: None,
            timestamp_ms: ts,
        }
    }

    #[test]
    fn test_apply_update_is_visible_on_read() {
        let mut store = SnapshotStore::new();

        store.apply_update(&reading(Some(23.5), 1_000));

        let view = store.read();
        assert_eq!(view.snapshot.temperature, Some(23.5));
        assert_eq!(view.snapshot.last_updated_at_ms, Some(1_000));
    }

    #[test]
    fn test_set_live_keeps_readings() {
        let mut store = SnapshotStore::new();

        store.apply_update(&reading(Some(23.5), 1_000));
        store.set_live(true);
        store.set_live(false);

        let view = store.read();
        assert!(!view.is_live);
        assert_eq!(view.snapshot.temperature, Some(23.5));
    }

    #[tokio::test]
    async fn test_watchers_see_every_change() {
        let mut store = SnapshotStore::new();
        let mut views = store.subscribe();

        store.apply_update(&reading(Some(23.5), 1_000));

        assert!(views.has_changed().unwrap());
        assert_eq!(*views.borrow_and_update(), store.read());

        store.set_live(true);

        assert!(views.has_changed().unwrap());
        assert!(views.borrow_and_update().is_live);
    }

    #[tokio::test]
    async fn test_redundant_live_flag_is_not_published() {
        let mut store = SnapshotStore::new();
        let mut views = store.subscribe();

        store.set_live(false);

        assert!(!views.has_changed().unwrap());
    }
}
