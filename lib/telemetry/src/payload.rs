use serde::Deserialize;
use serde_json::Value;

/// Raw record published by the sensor unit. Every key is optional, and the
/// firmware is known to emit readings both as JSON numbers and as quoted
/// strings, so numeric fields are kept as `Value` until coercion.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WirePayload {
    pub id: Option<String>,
    pub temp: Option<Value>,
    pub humid: Option<Value>,
    pub ldr: Option<Value>,
    pub vib: Option<Value>,
    pub relay: Option<Value>,
    pub ts: Option<Value>,
}

pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    // "NaN" and "inf" parse as f64 but make no sense as readings or
    // timestamps, treat them as coercion failures
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let number: f64 = text.trim().parse().ok()?;
            number.is_finite().then_some(number)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(23.5)), Some(23.5));
        assert_eq!(coerce_number(&json!(55)), Some(55.0));
        assert_eq!(coerce_number(&json!("42.1")), Some(42.1));
        assert_eq!(coerce_number(&json!(" 7 ")), Some(7.0));
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("-inf")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!([1, 2])), None);
    }

    #[test]
    fn test_deserialize_partial() {
        let payload: WirePayload =
            serde_json::from_str(r#"{"id":"esp32-01","temp":23.5,"relay":"1"}"#).unwrap();

        assert_eq!(payload.id.as_deref(), Some("esp32-01"));
        assert_eq!(payload.temp, Some(json!(23.5)));
        assert_eq!(payload.relay, Some(json!("1")));
        assert_eq!(payload.humid, None);
        assert_eq!(payload.ts, None);
    }
}
