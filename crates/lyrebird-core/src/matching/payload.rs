//! Request payload (JSON) matching.

use serde_json::Value;

/// Deep equality between the expected payload and the parsed request body.
///
/// Object keys are compared as sets, so key order never matters; arrays keep their order.
pub fn payload_matches(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(e), Value::Object(a)) => {
            e.len() == a.len()
                && e
                    .iter()
                    .all(|(k, ev)| a.get(k).is_some_and(|av| payload_matches(ev, av)))
        }
        (Value::Array(e), Value::Array(a)) => {
            e.len() == a.len() && e.iter().zip(a).all(|(ev, av)| payload_matches(ev, av))
        }
        (Value::Number(e), Value::Number(a)) => match (e.as_f64(), a.as_f64()) {
            (Some(ef), Some(af)) => ef == af,
            _ => e == a,
        },
        _ => expected == actual,
    }
}
