use serde::Serialize;

use crate::reading::ReadingUpdate;

/// The latest merged reading. A field absent from a given message keeps its
/// previous value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SensorSnapshot {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub light: Option<f64>,
    pub vibration: Option<f64>,
    pub relay: Option<f64>,
    pub last_updated_at_ms: Option<i64>,
}

impl SensorSnapshot {
    /// `last_updated_at_ms` is overwritten unconditionally.
    pub fn merge(&mut self, update: &ReadingUpdate) {
        if update.temperature.is_some() {
            self.temperature = update.temperature;
        }
        if update.humidity.is_some() {
            self.humidity = update.humidity;
        }
        if update.light.is_some() {
            self.light = update.light;
        }
        if update.vibration.is_some() {
            self.vibration = update.vibration;
        }
        if update.relay.is_some() {
            self.relay = update.relay;
        }
        self.last_updated_at_ms = Some(update.timestamp_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(temperature: Option<f64>, humidity: Option<f64>, ts: i64) -> ReadingUpdate {
        ReadingUpdate {
            temperature,
            humidity,
            light: None,
            vibration: None,
            relay: None,
            timestamp_ms: ts,
        }
    }

    #[test]
    fn test_merge_preserves_absent_fields() {
        let mut snapshot = SensorSnapshot::default();

        snapshot.merge(&update(Some(23.5), Some(55.0), 1_000));
        snapshot.merge(&update(None, Some(61.0), 2_000));

        assert_eq!(snapshot.temperature, Some(23.5));
        assert_eq!(snapshot.humidity, Some(61.0));
        assert_eq!(snapshot.light, None);
        assert_eq!(snapshot.last_updated_at_ms, Some(2_000));
    }

    #[test]
    fn test_latest_coercible_value_wins() {
        let mut snapshot = SensorSnapshot::default();

        snapshot.merge(&update(Some(20.0), None, 1_000));
        snapshot.merge(&update(Some(21.0), None, 2_000));
        snapshot.merge(&update(Some(22.0), None, 3_000));

        assert_eq!(snapshot.temperature, Some(22.0));
        assert_eq!(snapshot.humidity, None);
    }

    #[test]
    fn test_merge_is_idempotent_except_timestamp() {
        let mut once = SensorSnapshot::default();
        once.merge(&update(Some(23.5), Some(55.0), 1_000));

        let mut twice = once;
        twice.merge(&update(Some(23.5), Some(55.0), 2_000));

        assert_eq!(twice.temperature, once.temperature);
        assert_eq!(twice.humidity, once.humidity);
        assert_eq!(twice.last_updated_at_ms, Some(2_000));
    }
}
