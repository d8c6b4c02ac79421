mod payload;
mod reading;
mod snapshot;

pub use payload::WirePayload;
pub use reading::{normalize, Error, ReadingUpdate, MILLIS_THRESHOLD};
pub use snapshot::SensorSnapshot;
