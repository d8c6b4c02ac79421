use std::time::Duration;

use uuid::Uuid;

const DEFAULT_ADDRESS: &str = "wss://broker.hivemq.com:8884/mqtt";
const DEFAULT_TOPIC: &str = "industrial/monitor";
const DEFAULT_CLIENT_ID_PREFIX: &str = "monitor";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(60);
const DEFAULT_RECONNECT_BACKOFF: Duration = Duration::from_millis(2000);

#[derive(Clone, Debug)]
pub struct Config {
    pub address: String,
    pub topic: String,
    pub client_id_prefix: String,
    pub connect_timeout: Duration,
    pub keep_alive_interval: Duration,
    pub reconnect_backoff: Duration,
}

impl Config {
    pub fn from_env() -> Config {
        Config {
            address: env_or("MQTT_ADDRESS", DEFAULT_ADDRESS),
            topic: env_or("MQTT_TOPIC", DEFAULT_TOPIC),
            client_id_prefix: env_or("MQTT_CLIENT_ID_PREFIX", DEFAULT_CLIENT_ID_PREFIX),
            connect_timeout: env_millis("MQTT_CONNECT_TIMEOUT_MS")
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            keep_alive_interval: env_secs("MQTT_KEEP_ALIVE_SEC")
                .unwrap_or(DEFAULT_KEEP_ALIVE_INTERVAL),
            reconnect_backoff: env_millis("MQTT_RECONNECT_BACKOFF_MS")
                .unwrap_or(DEFAULT_RECONNECT_BACKOFF),
        }
    }

    /// Collision-resistant session identifier, a fresh one per connection.
    pub fn client_id(&self) -> String {
        format!("{}-{}", self.client_id_prefix, Uuid::new_v4().simple())
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_millis(name: &str) -> Option<Duration> {
    let millis = std::env::var(name).ok()?.parse().ok()?;
    Some(Duration::from_millis(millis))
}

fn env_secs(name: &str) -> Option<Duration> {
    let secs = std::env::var(name).ok()?.parse().ok()?;
    Some(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_is_unique_per_session() {
        let config = Config {
            address: DEFAULT_ADDRESS.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
            client_id_prefix: "dashboard".to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            keep_alive_interval: DEFAULT_KEEP_ALIVE_INTERVAL,
            reconnect_backoff: DEFAULT_RECONNECT_BACKOFF,
        };

        let first = config.client_id();
        let second = config.client_id();

        assert!(first.starts_with("dashboard-"));
        assert_ne!(first, second);
    }
}
