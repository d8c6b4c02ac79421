use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::StreamExt;
use log::{debug, error};
use paho_mqtt as mqtt;
use tokio::sync::mpsc;
use tokio::task;
use tokio::time;

use crate::transport::{Transport, TransportEvent};
use crate::{Config, Result};

/// Lifecycle callbacks and the message stream run on the paho client's own
/// threads, so everything is funneled into one channel and consumed from a
/// single place.
pub struct MqttTransport {
    address: String,
    client: mqtt::AsyncClient,
    events_tx: mpsc::UnboundedSender<TransportEvent>,
    events: mpsc::UnboundedReceiver<TransportEvent>,
    connect_timeout: Duration,
    keep_alive_interval: Duration,
    reconnect_backoff: Duration,
}

impl MqttTransport {
    pub fn new(config: &Config) -> Result<MqttTransport> {
        let create_opts = mqtt::CreateOptionsBuilder::new_v3()
            .server_uri(&config.address)
            .client_id(config.client_id())
            .finalize();

        let mut client = mqtt::AsyncClient::new(create_opts)?;

        let (tx, rx) = mpsc::unbounded_channel();

        let events = tx.clone();
        client.set_connected_callback(move |_| {
            let _ = events.send(TransportEvent::Connected);
        });

        let events = tx.clone();
        client.set_connection_lost_callback(move |_| {
            let _ = events.send(TransportEvent::Reconnecting);
        });

        let mut stream = client.get_stream(None);
        let events = tx.clone();
        task::spawn(async move {
            while let Some(message) = stream.next().await {
                let event = match message {
                    Some(message) => TransportEvent::Message(message.payload().to_vec()),
                    None => TransportEvent::Offline,
                };

                if events.send(event).is_err() {
                    break;
                }
            }

            debug!("message stream closed");
        });

        Ok(MqttTransport {
            address: config.address.clone(),
            client,
            events_tx: tx,
            events: rx,
            connect_timeout: config.connect_timeout,
            keep_alive_interval: config.keep_alive_interval,
            reconnect_backoff: config.reconnect_backoff,
        })
    }
}

#[async_trait]
impl Transport for MqttTransport {
    async fn connect(&mut self) -> Result<()> {
        let conn_opts = mqtt::ConnectOptionsBuilder::new_v3()
            .keep_alive_interval(self.keep_alive_interval)
            .connect_timeout(self.connect_timeout)
            .automatic_reconnect(self.reconnect_backoff, self.reconnect_backoff * 30)
            .clean_session(true)
            .ssl_options(mqtt::SslOptions::new())
            .finalize();

        // keeps trying until the broker is reachable; once connected, the
        // client reconnects on its own after drops
        while let Err(err) = self.client.connect(conn_opts.clone()).await {
            error!("Error connecting to {}: {err}", self.address);
            let _ = self.events_tx.send(TransportEvent::Error(err.to_string()));
            time::sleep(self.reconnect_backoff).await;
        }

        Ok(())
    }

    async fn subscribe(&mut self, topic: &str) -> Result<()> {
        // the device publishes fire-and-forget, only the latest reading
        // matters
        self.client.subscribe(topic, mqtt::QOS_0).await?;
        Ok(())
    }

    async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.events.close();

        if self.client.is_connected() {
            self.client.disconnect(None).await?;
        }

        Ok(())
    }
}
