use async_trait::async_trait;

use crate::Result;

#[derive(Debug)]
pub enum TransportEvent {
    Connected,
    Reconnecting,
    Closed,
    Offline,
    Error(String),
    Message(Vec<u8>),
}

/// A binding must deliver all events on a single logical queue and retry
/// dropped connections on its own.
#[async_trait]
pub trait Transport {
    async fn connect(&mut self) -> Result<()>;

    async fn subscribe(&mut self, topic: &str) -> Result<()>;

    /// `None` once the session is closed and drained.
    async fn next_event(&mut self) -> Option<TransportEvent>;

    /// Must be idempotent.
    async fn disconnect(&mut self) -> Result<()>;
}
