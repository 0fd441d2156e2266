//! Partial record matching used to pick store records
use serde_json::{Map, Value};

/// Whether `candidate` contains every key of `payload` with an equal value
///
/// Extra fields on the candidate are ignored. Numbers compare by value, so `123`
/// matches `123.0`.
pub fn record_matches(candidate: &Value, payload: &Map<String, Value>) -> bool {
    let Some(fields) = candidate.as_object() else {
        return false;
    };

    payload
        .iter()
        .all(|(key, expected)| fields.get(key).is_some_and(|actual| values_equal(actual, expected)))
}

/// Index of the first record in store order matching `payload`
pub fn first_match(records: &[Value], payload: &Map<String, Value>) -> Option<usize> {
    records.iter().position(|record| record_matches(record, payload))
}

fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b)),
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len() && a.iter().all(|(key, value)| b.get(key).is_some_and(|other| values_equal(value, other)))
        }
        _ => actual == expected,
    }
}
