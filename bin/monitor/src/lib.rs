mod config;
mod error;
mod manager;
mod mqtt;
mod store;
mod transport;

pub use config::Config;
pub use error::Error;
pub use manager::{ConnectionManager, ConnectionState};
pub use mqtt::MqttTransport;
pub use store::{SnapshotStore, StoreView};
pub use transport::{Transport, TransportEvent};

pub type Result<T> = std::result::Result<T, Error>;
