use chrono::Utc;
use log::{debug, error, info};
use telemetry::SensorSnapshot;
use tokio::sync::watch;

use crate::store::{SnapshotStore, StoreView};
use crate::transport::{Transport, TransportEvent};
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Errored,
}

impl ConnectionState {
    pub fn is_live(self) -> bool {
        self == ConnectionState::Connected
    }
}

pub struct ConnectionManager<T> {
    transport: T,
    topic: String,
    store: SnapshotStore,
    state: ConnectionState,
}

impl<T: Transport> ConnectionManager<T> {
    pub fn new(transport: T, topic: String, store: SnapshotStore) -> ConnectionManager<T> {
        ConnectionManager {
            transport,
            topic,
            store,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn read(&self) -> StoreView {
        self.store.read()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreView> {
        self.store.subscribe()
    }

    pub async fn start(&mut self) -> Result<()> {
        self.transition(ConnectionState::Connecting);
        self.transport.connect().await
    }

    /// Events arrive on a single queue, so handlers never run concurrently
    /// and the store needs no locking.
    pub async fn run(&mut self) {
        while let Some(event) = self.transport.next_event().await {
            self.handle_event(event).await;
        }
    }

    /// Safe to call twice or on a session that never connected.
    pub async fn stop(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }

        if let Err(err) = self.transport.disconnect().await {
            error!("Error disconnecting: {err}");
        }

        self.transition(ConnectionState::Disconnected);
    }

    async fn handle_event(&mut self, event: TransportEvent) {
        // events still buffered at teardown must not resurrect the session
        if self.state == ConnectionState::Disconnected {
            debug!("dropped {event:?} after teardown");
            return;
        }

        match event {
            TransportEvent::Connected => {
                info!("connected to broker");
                self.transition(ConnectionState::Connected);

                match self.transport.subscribe(&self.topic).await {
                    // a rejected subscription doesn't degrade the
                    // connection, there just won't be any messages until
                    // the next reconnect re-issues it
                    Err(err) => error!("Error subscribing to {}: {err}", self.topic),
                    Ok(()) => info!("Subscribed to topic: {}", self.topic),
                }
            }
            TransportEvent::Reconnecting | TransportEvent::Closed | TransportEvent::Offline => {
                error!("Lost connection to broker. Waiting for transport to reconnect.");
                self.transition(ConnectionState::Reconnecting);
            }
            TransportEvent::Error(err) => {
                error!("Transport error: {err}");
                self.transition(ConnectionState::Errored);
            }
            TransportEvent::Message(payload) => match self.handle_message(&payload) {
                Ok(snapshot) => debug!("snapshot {snapshot:?}"),
                Err(err) => error!("Error processing message: {err}"),
            },
        }
    }

    fn handle_message(&mut self, payload: &[u8]) -> Result<SensorSnapshot> {
        let arrival_ms = Utc::now().timestamp_millis();
        let update = telemetry::normalize(payload, arrival_ms)?;

        self.store.apply_update(&update);

        Ok(self.store.read().snapshot)
    }

    fn transition(&mut self, state: ConnectionState) {
        if self.state == state {
            return;
        }

        debug!("connection state {:?} -> {:?}", self.state, state);
        self.state = state;
        self.store.set_live(state.is_live());
    }
}
