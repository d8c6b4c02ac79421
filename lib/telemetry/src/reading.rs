use std::fmt;

use crate::payload::{coerce_number, WirePayload};

/// Source timestamps at or below this magnitude are treated as seconds since
/// epoch and scaled to milliseconds; larger values are used as milliseconds
/// unscaled. This assumes the device never sends a seconds timestamp past
/// ~3186 AD nor a milliseconds timestamp before ~1973. The firmware doesn't
/// document its clock encoding, so the threshold is an observation, not a
/// contract.
pub const MILLIS_THRESHOLD: f64 = 1e11;

#[derive(Clone, Debug, PartialEq)]
pub struct ReadingUpdate {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub light: Option<f64>,
    pub vibration: Option<f64>,
    pub relay: Option<f64>,
    pub timestamp_ms: i64,
}

#[derive(Debug)]
pub enum Error {
    MalformedPayload(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedPayload(err) => write!(f, "malformed payload: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedPayload(err)
    }
}

/// A field that fails numeric coercion becomes "no update" for that field
/// only, never a message-level failure. `arrival_ms` is used when the
/// payload carries no usable source timestamp.
pub fn normalize(bytes: &[u8], arrival_ms: i64) -> Result<ReadingUpdate, Error> {
    let payload: WirePayload = serde_json::from_slice(bytes)?;

    Ok(ReadingUpdate {
        temperature: payload.temp.as_ref().and_then(coerce_number),
        humidity: payload.humid.as_ref().and_then(coerce_number),
        light: payload.ldr.as_ref().and_then(coerce_number),
        vibration: payload.vib.as_ref().and_then(coerce_number),
        relay: payload.relay.as_ref().and_then(coerce_number),
        timestamp_ms: canonical_timestamp(payload.ts.as_ref(), arrival_ms),
    })
}

fn canonical_timestamp(ts: Option<&serde_json::Value>, arrival_ms: i64) -> i64 {
    match ts.and_then(coerce_number) {
        Some(raw) if raw > MILLIS_THRESHOLD => raw as i64,
        Some(raw) => (raw * 1000.0) as i64,
        None => arrival_ms,
    }
}
