use monitor::{Config, ConnectionManager, MqttTransport, Result, SnapshotStore};

use log::{debug, info};
use tokio::signal::unix::{signal, SignalKind};
use tokio::task;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init_timed();

    info!("monitor version {VERSION}");

    let config = Config::from_env();
    info!("broker {} topic {}", config.address, config.topic);

    let transport = MqttTransport::new(&config)?;
    let mut manager = ConnectionManager::new(transport, config.topic, SnapshotStore::new());

    // stands in for the dashboard render loop
    let mut views = manager.subscribe();
    task::spawn(async move {
        while views.changed().await.is_ok() {
            let view = *views.borrow_and_update();
            debug!("view {view:?}");
        }
    });

    manager.start().await?;

    tokio::select! {
        _ = manager.run() => {},
        _ = wait_for_sigterm() => info!("got SIGTERM, exiting..."),
    };

    manager.stop().await;

    Ok(())
}

async fn wait_for_sigterm() {
    let mut sig = signal(SignalKind::terminate()).expect("failed to listen for SIGTERM");
    sig.recv().await;
}
